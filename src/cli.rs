use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};

use crate::cmd::Cmd;
use crate::options::Options;
use crate::flatten_reader;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         Flatten a JSON document into one <path>\\t<value> line per scalar\n\
         leaf. INPUT is an optional input file; reads stdin when omitted\n\
         or \"-\".\n\
         \n\
         Options:\n\
           -o, --output FILE        Write records to FILE (default stdout)\n\
               --color WHEN         auto|always|never (default auto)\n\
               --page-info          Print captured pageInfo signals to stderr\n\
               --buffer-size BYTES  Read buffer size (default 65536)\n\
           -x, --exec PROG [ARG..]  Flatten the stdout of PROG; everything\n\
                                    after this flag is the command line\n\
           -h, --help               Show this help\n",
        prog = program
    );
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    color: ColorWhen,
    page_info: bool,
    buffer_size: usize,
    exec: Option<Vec<String>>,
}

fn parse_args() -> CliMode {
    let mut args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "jflat".to_string());
    args.remove(0);

    let mut mode = CliMode {
        input: None,
        output: None,
        color: ColorWhen::Auto,
        page_info: false,
        buffer_size: 65536,
        exec: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                mode.output = Some(args[i].clone());
            }
            "--color" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing WHEN for --color");
                    std::process::exit(2);
                }
                mode.color = match args[i].as_str() {
                    "auto" => ColorWhen::Auto,
                    "always" => ColorWhen::Always,
                    "never" => ColorWhen::Never,
                    other => {
                        eprintln!("Unknown color mode: {}", other);
                        std::process::exit(2);
                    }
                };
            }
            "--page-info" => {
                mode.page_info = true;
            }
            "--buffer-size" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing BYTES for --buffer-size");
                    std::process::exit(2);
                }
                mode.buffer_size = args[i].parse().unwrap_or(65536);
            }
            "-x" | "--exec" => {
                let rest = args[i + 1..].to_vec();
                if rest.is_empty() {
                    eprintln!("Missing PROG for --exec");
                    std::process::exit(2);
                }
                mode.exec = Some(rest);
                break;
            }
            "-" => {
                mode.input = None;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                mode.input = Some(path.to_string());
            }
        }
        i += 1;
    }

    if mode.exec.is_some() && mode.input.is_some() {
        eprintln!("INPUT and --exec are mutually exclusive");
        std::process::exit(2);
    }

    mode
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mode = parse_args();

    let opts = Options {
        colorize: match mode.color {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => mode.output.is_none() && io::stdout().is_terminal(),
        },
        read_buffer: mode.buffer_size.max(1024),
    };

    let mut out: Box<dyn Write> = if let Some(ref path) = mode.output {
        Box::new(BufWriter::new(File::create(path)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    let src: Box<dyn Read> = if let Some(ref argv) = mode.exec {
        let cmd = Cmd::from_argv(argv).expect("--exec argv is non-empty");
        Box::new(cmd.reader()?)
    } else {
        match mode.input {
            Some(ref path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(io::stdin().lock()),
        }
    };

    // Flush whatever was written even when flattening fails midway;
    // records already emitted stay valid.
    let result = flatten_reader(src, &mut out, &opts);
    out.flush()?;
    let signals = result?;

    if mode.page_info {
        eprintln!("hasNextPage\t{}", signals.has_next_page);
        eprintln!("endCursor\t{}", signals.end_cursor);
    }

    Ok(())
}
