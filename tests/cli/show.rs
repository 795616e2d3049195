//! Tests for `pwstore show`.

use crate::support::*;

#[test]
fn test_show_prints_whole_entry() {
    let t = Test::sample();

    let output = t.show("gmail");
    assert_success(&output);
    assert_eq!(stdout(&output), "pw1\nuser: me@gmail.com\n");
}

#[test]
fn test_show_alias() {
    let t = Test::sample();

    let output = t.cmd().args(["sh", "checking"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "pw3\naccount: 1234\n");
}

#[test]
fn test_show_adds_trailing_newline() {
    let t = Test::new();
    t.backend("misc", CLEARTEXT_CONF);
    t.entry("misc", "note", "no newline");

    let output = t.show("note");
    assert_success(&output);
    assert_eq!(stdout(&output), "no newline\n");
}

#[test]
fn test_show_no_match_fails() {
    let t = Test::sample();

    let output = t.show("zzz");
    assert_failure(&output);
    assert_stderr_contains(&output, "no entry matches");
}
