//! pwstore - hierarchical secret store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pwstore::cli::output;
use pwstore::cli::{execute, Cli};
use pwstore::core::constants::LOG_ENV;
use pwstore::error::{CipherError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pwstore=debug")
        } else {
            EnvFilter::new("pwstore=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Store(StoreError::UnknownBackend(_)) => Some("run: pwstore list"),
            Error::Cipher(CipherError::MissingKeys { .. }) => {
                Some("import the public keys into your gpg keyring")
            }
            Error::NoMatch(_) => Some("run: pwstore list <pattern>"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
