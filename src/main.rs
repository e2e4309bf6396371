//! blt - Drush alias generation for Acquia Cloud.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blt::cli::output;
use blt::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("BLT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("blt=debug")
        } else {
            EnvFilter::new("blt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(output::colors_enabled())
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
