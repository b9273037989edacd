//! kvsecrets - Pull Azure Key Vault secrets into a CI step.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kvsecrets::cli::{execute, Cli};
use kvsecrets::core::constants::LOG_ENV;
use kvsecrets::core::runner::{ActionsRunner, Runner};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kvsecrets=debug")
        } else {
            EnvFilter::new("kvsecrets=warn")
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

    let runner = ActionsRunner::from_env();

    if let Err(e) = execute(cli.command, &runner) {
        for message in e.annotations() {
            runner.fail(&message);
        }
        std::process::exit(1);
    }
}
