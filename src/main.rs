//! wallet-trades CLI
//!
//! Downloads a wallet's trade history to a JSON or JSONL file

use clap::{CommandFactory, Parser};
use wallet_trades::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    // Bare invocation prints usage and exits cleanly
    if std::env::args_os().len() <= 1 {
        let mut command = Cli::command();
        if command.print_help().is_ok() {
            println!();
        }
        return;
    }

    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
