//! Output module
//!
//! Handles writing the trade file and rendering the console summary.

mod summary;
mod writer;

pub use summary::Summary;
pub use writer::{default_output_path, write_trades, OutputFormat, TradeWriter};
