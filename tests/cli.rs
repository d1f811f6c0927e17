use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("jflat").unwrap()
}

#[test]
fn cli_stdin_to_stdout() {
    bin()
        .write_stdin(r#"{"a":1,"b":{"c":true}}"#)
        .assert()
        .success()
        .stdout(".a\t1\n.b.c\ttrue\n");
}

#[test]
fn cli_array_indexing() {
    bin()
        .write_stdin("[1,2,3]")
        .assert()
        .success()
        .stdout(".[0]\t1\n.[1]\t2\n.[2]\t3\n");
}

#[test]
fn cli_no_color_when_piped() {
    bin()
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}").not());
}

#[test]
fn cli_color_always_emits_sgr() {
    bin()
        .args(["--color", "always"])
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout("\u{1b}[0;36m.a\u{1b}[m\t\u{1b}[35;1m1\u{1b}[m\n");
}

#[test]
fn cli_color_never_is_plain() {
    bin()
        .args(["--color", "never"])
        .write_stdin(r#"{"b":true}"#)
        .assert()
        .success()
        .stdout(".b\ttrue\n");
}

#[test]
fn cli_file_to_file() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("in.json");
    let out = dir.path().join("out.txt");
    fs::write(&inp, r#"{"k":[null,"v"]}"#).unwrap();
    bin()
        .args([inp.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap(), ".k.[0]\t\n.k.[1]\tv\n");
}

#[test]
fn cli_malformed_input_fails_but_keeps_records() {
    bin()
        .write_stdin(r#"{"a":1"#)
        .assert()
        .failure()
        .code(1)
        .stdout(".a\t1\n")
        .stderr(predicate::str::contains("unexpected end of input"));
}

#[test]
fn cli_page_info_goes_to_stderr() {
    bin()
        .arg("--page-info")
        .write_stdin(r#"{"data":{"pageInfo":{"hasNextPage":true,"endCursor":"abc123"}}}"#)
        .assert()
        .success()
        .stderr(
            predicate::str::contains("hasNextPage\ttrue")
                .and(predicate::str::contains("endCursor\tabc123")),
        );
}

#[test]
fn cli_unknown_option_is_usage_error() {
    bin().arg("--nope").assert().failure().code(2);
}

#[test]
fn cli_missing_input_file_fails() {
    bin()
        .arg("definitely-missing.json")
        .assert()
        .failure()
        .code(1);
}

#[cfg(unix)]
#[test]
fn cli_exec_flattens_child_stdout() {
    bin()
        .args(["--exec", "sh", "-c", r#"printf '{"k":7}'"#])
        .assert()
        .success()
        .stdout(".k\t7\n");
}

#[cfg(unix)]
#[test]
fn cli_exec_conflicts_with_input_file() {
    bin()
        .args(["input.json", "--exec", "sh", "-c", "true"])
        .assert()
        .failure()
        .code(2);
}
