//! Test fixtures and constants.

/// Marker file for a cleartext backend.
pub const CLEARTEXT_CONF: &str = "[backend]\ntype = cleartext\n";

/// Marker file naming an unsupported backend type.
pub const UNKNOWN_CONF: &str = "[backend]\ntype = rot13\n";

/// Entries of the `personal` sample backend.
pub const SAMPLE_ENTRIES: &[(&str, &str)] = &[
    ("email/gmail", "pw1\nuser: me@gmail.com\n"),
    ("email/work/vpn", "pw2\n"),
    ("bank/checking", "pw3\naccount: 1234\n"),
];

/// Tree printed by `list email` for the sample backend.
pub const SAMPLE_EMAIL_TREE: &str =
    "personal\n└── email\n    ├── gmail\n    └── work\n        └── vpn\n";
