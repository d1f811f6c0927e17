use super::*;

#[test]
fn plain_output_has_no_escape_bytes() {
    let (out, _) = flat(r#"{"a":1,"b":true,"c":"x","d":null}"#);
    assert!(!out.contains('\u{1b}'));
}

#[test]
fn paths_and_numbers_are_wrapped() {
    let (out, _) = flat_colored(r#"{"a":1}"#);
    assert_eq!(out, "\u{1b}[0;36m.a\u{1b}[m\t\u{1b}[35;1m1\u{1b}[m\n");
}

#[test]
fn booleans_are_wrapped() {
    let (out, _) = flat_colored(r#"{"ok":true}"#);
    assert_eq!(out, "\u{1b}[0;36m.ok\u{1b}[m\t\u{1b}[33;1mtrue\u{1b}[m\n");
}

#[test]
fn strings_and_nulls_stay_unadorned() {
    let (out, _) = flat_colored(r#"{"s":"x","n":null}"#);
    assert_eq!(
        out,
        "\u{1b}[0;36m.s\u{1b}[m\tx\n\u{1b}[0;36m.n\u{1b}[m\t\n"
    );
}

#[test]
fn separator_tab_is_never_colored() {
    let (out, _) = flat_colored(r#"{"a":1}"#);
    // The tab sits between a reset and the next escape, uncolored.
    assert!(out.contains("\u{1b}[m\t"));
}

#[test]
fn empty_path_is_still_wrapped() {
    // Bare top-level scalar: the empty path segment is wrapped too.
    let (out, _) = flat_colored("42");
    assert_eq!(out, "\u{1b}[0;36m\u{1b}[m\t\u{1b}[35;1m42\u{1b}[m\n");
}

#[test]
fn colorize_only_adds_escape_sequences() {
    // Stripping SGR sequences from colored output recovers the plain
    // output byte for byte.
    let doc = r#"{"a":[1,true,"s",null]}"#;
    let (plain, _) = flat(doc);
    let (colored, _) = flat_colored(doc);
    let mut stripped = String::new();
    let mut rest = colored.as_str();
    while let Some(start) = rest.find('\u{1b}') {
        stripped.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = tail.find('m').expect("escape sequence is terminated");
        rest = &tail[end + 1..];
    }
    stripped.push_str(rest);
    assert_eq!(stripped, plain);
}
