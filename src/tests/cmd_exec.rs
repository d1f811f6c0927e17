use super::*;
use crate::Cmd;

#[test]
fn display_renders_shell_quoted() {
    let cmd = Cmd::new("git")
        .arg("log")
        .arg("--format=%H %s")
        .arg("")
        .arg("it's");
    assert_eq!(
        cmd.to_string(),
        r#"git log "--format=%H %s" "" "it's""#
    );
}

#[test]
fn display_single_quotes_args_with_double_quotes() {
    let cmd = Cmd::new("echo").arg(r#"say "hi""#);
    assert_eq!(cmd.to_string(), r#"echo 'say "hi"'"#);
}

#[test]
fn from_argv_splits_program_and_args() {
    let argv = vec!["grep".to_string(), "-r".to_string(), "needle".to_string()];
    let cmd = Cmd::from_argv(&argv).unwrap();
    assert_eq!(cmd.to_string(), "grep -r needle");
    assert!(Cmd::from_argv(&[]).is_none());
}

#[test]
fn lookup_reports_missing_commands() {
    let err = Cmd::new("jflat-test-no-such-binary").lookup().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn lookup_finds_programs_on_path() {
    let path = Cmd::new("sh").lookup().unwrap();
    assert!(path.is_absolute());
}

#[cfg(unix)]
#[test]
fn reader_streams_child_stdout_into_flatten() {
    let cmd = Cmd::new("sh")
        .arg("-c")
        .arg(r#"printf '{"a":1,"b":[true,null]}'"#);
    let mut out = Vec::new();
    let signals =
        crate::flatten_reader(cmd.reader().unwrap(), &mut out, &Options::default()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        ".a\t1\n.b.[0]\ttrue\n.b.[1]\t\n"
    );
    assert_eq!(signals, Signals::default());
}

#[cfg(unix)]
#[test]
fn dropping_reader_early_reaps_the_child() {
    let cmd = Cmd::new("sh").arg("-c").arg("seq 1 100000");
    let reader = cmd.reader().unwrap();
    // Closing the pipe before EOF must still reap the child.
    drop(reader);
}

#[cfg(unix)]
#[test]
fn output_captures_stdout() {
    let out = Cmd::new("sh").arg("-c").arg("printf hello").output().unwrap();
    assert_eq!(out, "hello");
}

#[cfg(unix)]
#[test]
fn output_fails_on_nonzero_exit() {
    assert!(Cmd::new("sh").arg("-c").arg("exit 3").output().is_err());
}

#[cfg(unix)]
#[test]
fn success_reflects_exit_status() {
    assert!(Cmd::new("sh").arg("-c").arg("exit 0").success());
    assert!(!Cmd::new("sh").arg("-c").arg("exit 1").success());
}
