//! Tests for `pwstore create`.

use crate::support::*;

#[test]
fn test_create_then_get() {
    let t = Test::sample();

    let output = t.create("personal", "social/forum", "forum-pw\nuser: me\n");
    assert_success(&output);
    assert_stderr_contains(&output, "created personal/social/forum");
    assert_eq!(t.read("personal", "social/forum"), "forum-pw\nuser: me\n");

    let output = t.get("forum");
    assert_success(&output);
    assert_eq!(stdout(&output), "forum-pw\n");
}

#[test]
fn test_create_shows_up_in_list() {
    let t = Test::sample();

    assert_success(&t.create("personal", "email/yahoo", "pw4\n"));

    let output = t.list("email");
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "personal\n└── email\n    ├── gmail\n    ├── work\n    │   └── vpn\n    └── yahoo\n"
    );
}

#[test]
fn test_create_existing_key_fails() {
    let t = Test::sample();

    let output = t.create("personal", "email/gmail", "other\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_eq!(t.read("personal", "email/gmail"), "pw1\nuser: me@gmail.com\n");
}

#[test]
fn test_create_unknown_storage_fails_with_hint() {
    let t = Test::sample();

    let output = t.create("nope", "a", "x\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "no such storage: nope");
    assert_stderr_contains(&output, "pwstore list");
}

#[test]
fn test_create_path_conflict_fails() {
    let t = Test::sample();

    // email/gmail is a file, so it cannot be a directory.
    let output = t.create("personal", "email/gmail/extra", "x\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "path conflict");
}

#[test]
fn test_create_rejects_invalid_keys() {
    let t = Test::sample();

    for key in ["/abs", "a//b", "../escape", "dir/storage.conf"] {
        let output = t.create("personal", key, "x\n");
        assert_failure(&output);
        assert_stderr_contains(&output, "invalid key");
    }
}

#[cfg(unix)]
#[test]
fn test_create_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::sample();
    assert_success(&t.create("personal", "private", "x\n"));

    let path = t.backend_dir("personal").join("private");
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
