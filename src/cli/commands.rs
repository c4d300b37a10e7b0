//! CLI arguments

use crate::filter::WalletAddress;
use crate::output::OutputFormat;
use crate::types::Side;
use clap::Parser;
use std::path::PathBuf;

/// Download a wallet's public trade history
#[derive(Parser, Debug)]
#[command(name = "wallet-trades")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Wallet address (0x followed by 40 hex characters)
    #[arg(value_parser = parse_address)]
    pub address: WalletAddress,

    /// Only trades in this market (condition id)
    #[arg(short, long)]
    pub market: Option<String>,

    /// Only trades in this event
    #[arg(short, long)]
    pub event: Option<String>,

    /// Only trades on this side
    #[arg(short, long, ignore_case = true)]
    pub side: Option<Side>,

    /// Output format
    #[arg(short, long, default_value = "jsonl")]
    pub format: OutputFormat,

    /// Output file (default: trades_<address>.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_address(s: &str) -> Result<WalletAddress, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}
