//! Tests for `pwstore list`.

use crate::support::*;

#[test]
fn test_list_pattern_renders_tree() {
    let t = Test::sample();

    let output = t.list("email");
    assert_success(&output);
    assert_eq!(stdout(&output), SAMPLE_EMAIL_TREE);
}

#[test]
fn test_list_without_pattern_shows_everything() {
    let t = Test::sample();

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "personal\n\
         ├── bank\n\
         │   └── checking\n\
         └── email\n    \
             ├── gmail\n    \
             └── work\n        \
                 └── vpn\n"
    );
}

#[test]
fn test_list_alias() {
    let t = Test::sample();

    let output = t.cmd().args(["ls", "vpn"]).output().unwrap();
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "personal\n└── email\n    └── work\n        └── vpn\n"
    );
}

#[test]
fn test_list_is_case_insensitive() {
    let t = Test::sample();

    let output = t.list("GMAIL");
    assert_success(&output);
    assert_stdout_contains(&output, "gmail");
}

#[test]
fn test_list_no_match_prints_nothing() {
    let t = Test::sample();

    let output = t.list("nothing-like-this");
    assert_success(&output);
    assert_eq!(stdout(&output), "");
    assert_stderr_contains(&output, "no matching keys");
}

#[test]
fn test_list_multiple_backends_in_name_order() {
    let t = Test::sample();
    t.backend("work", CLEARTEXT_CONF);
    t.entry("work", "jira", "pw\n");

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    let personal = out.find("personal\n").unwrap();
    let work = out.find("work\n└── jira").unwrap();
    assert!(personal < work);
}

#[test]
fn test_list_skips_marker_and_hidden_files() {
    let t = Test::sample();
    t.entry("personal", ".hidden", "x");
    t.entry("personal", ".git/config", "x");

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    assert_stdout_excludes(&output, "storage.conf");
    assert_stdout_excludes(&output, "hidden");
    assert_stdout_excludes(&output, ".git");
}

#[test]
fn test_list_literal_mode() {
    let t = Test::new();
    t.backend("web", CLEARTEXT_CONF);
    t.entry("web", "a.b", "1");
    t.entry("web", "axb", "2");

    let output = t.cmd().args(["list", "-F", "a.b"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "web\n└── a.b\n");

    let output = t.cmd().args(["list", "a.b"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "web\n├── a.b\n└── axb\n");
}

#[test]
fn test_list_skips_broken_backend() {
    let t = Test::sample();
    t.backend("broken", UNKNOWN_CONF);
    t.entry("broken", "secret", "x");

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    assert_stdout_excludes(&output, "broken");
    assert_stderr_contains(&output, "rot13");
}

#[test]
fn test_list_empty_storage() {
    let t = Test::new();

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_list_nested_backend_is_part_of_outer() {
    let t = Test::sample();
    t.backend("personal/inner", CLEARTEXT_CONF);

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    // The inner marker does not start a second backend.
    assert_eq!(stdout(&output).matches("personal\n").count(), 1);
    assert_stdout_excludes(&output, "storage.conf");
}
