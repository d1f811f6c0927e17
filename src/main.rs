use std::process;

fn main() {
    if let Err(err) = jflat::cli::run() {
        eprintln!("jflat: {}", err);
        process::exit(1);
    }
}
