//! Tests for `pwstore get`.

use crate::support::*;

#[test]
fn test_get_prints_first_line() {
    let t = Test::sample();

    let output = t.get("gmail");
    assert_success(&output);
    assert_eq!(stdout(&output), "pw1\n");
}

#[test]
fn test_get_alias() {
    let t = Test::sample();

    let output = t.cmd().args(["g", "checking"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "pw3\n");
}

#[test]
fn test_get_first_match_wins() {
    let t = Test::sample();

    // "email" matches gmail before work/vpn in walk order.
    let output = t.get("email");
    assert_success(&output);
    assert_eq!(stdout(&output), "pw1\n");
}

#[test]
fn test_get_strips_crlf() {
    let t = Test::new();
    t.backend("win", CLEARTEXT_CONF);
    t.entry("win", "site", "secret\r\nmore\r\n");

    let output = t.get("site");
    assert_success(&output);
    assert_eq!(stdout(&output), "secret\n");
}

#[test]
fn test_get_empty_first_line_is_a_hit() {
    let t = Test::new();
    t.backend("misc", CLEARTEXT_CONF);
    t.entry("misc", "blank", "\nnotes\n");

    let output = t.get("blank");
    assert_success(&output);
    assert_eq!(stdout(&output), "\n");
}

#[test]
fn test_get_no_match_fails() {
    let t = Test::sample();

    let output = t.get("nothing-like-this");
    assert_failure(&output);
    assert_eq!(stdout(&output), "");
    assert_stderr_contains(&output, "no entry matches 'nothing-like-this'");
}

#[test]
fn test_get_invalid_regex_fails() {
    let t = Test::sample();

    let output = t.get("(unclosed");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid pattern");
}

#[test]
fn test_get_literal_accepts_regex_metacharacters() {
    let t = Test::new();
    t.backend("misc", CLEARTEXT_CONF);
    t.entry("misc", "c++", "plus\n");

    let output = t.cmd().args(["get", "-F", "c++"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "plus\n");
}

#[test]
fn test_get_requires_pattern() {
    let t = Test::sample();

    let output = t.cmd().arg("get").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_get_scenario_with_predicates() {
    use predicates::prelude::*;

    let t = Test::sample();

    t.cmd()
        .args(["get", "gmail"])
        .assert()
        .success()
        .stdout(predicate::eq("pw1\n"))
        .stderr(predicate::str::is_empty());

    t.cmd()
        .args(["get", "missing"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no entry matches 'missing'"));
}
