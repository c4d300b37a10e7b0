// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # wallet-trades
//!
//! Downloads a wallet's public trade history from an offset-paginated
//! trades API, deduplicating by transaction hash across pages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wallet_trades::{FetchConfig, Paginator, QueryFilter, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let wallet = "0x56687bf447db6ffa42ffe2204a05edaa20f55839".parse()?;
//!     let filter = QueryFilter::new(wallet);
//!
//!     let paginator = Paginator::http(FetchConfig::default())?;
//!     let outcome = paginator.run(&filter).await?;
//!
//!     if outcome.hit_ceiling {
//!         eprintln!("more trades may exist beyond the offset ceiling");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌─────────────┐
//! │     CLI      │──▶│        Paginator         │──▶│   Output    │
//! │ args, config │   │ offsets, dedup, ceiling  │   │ JSON/JSONL  │
//! └──────────────┘   └────────────┬─────────────┘   │ summary     │
//!                                 │                 └─────────────┘
//!                    ┌────────────┴─────────────┐
//!                    │       PageFetcher        │
//!                    │  retry 429/5xx, backoff  │
//!                    └────────────┬─────────────┘
//!                    ┌────────────┴─────────────┐
//!                    │  Transport (reqwest GET) │
//!                    └──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Wallet address and query filters
pub mod filter;

/// Fetch configuration
pub mod config;

/// HTTP transport and retrying page fetcher
pub mod http;

/// Offset pagination with dedup
pub mod pagination;

/// Trade file writer and console summary
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FetchConfig;
pub use error::{Error, Result};
pub use filter::{QueryFilter, WalletAddress};
pub use pagination::{PaginationOutcome, Paginator};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
