//! Trade file writer
//!
//! Writes records exactly as received, either as a pretty-printed JSON
//! array or as JSON Lines.

use crate::error::{Error, Result};
use crate::filter::WalletAddress;
use crate::types::TradeRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Jsonl,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        }
    }
}

/// `trades_<address>.<ext>` with the address lowercased
pub fn default_output_path(address: &WalletAddress, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!(
        "trades_{}.{}",
        address.as_str().to_lowercase(),
        format.extension()
    ))
}

/// Writes a trade list to one file
#[derive(Debug, Clone)]
pub struct TradeWriter {
    path: PathBuf,
    format: OutputFormat,
}

impl TradeWriter {
    /// Create a writer for `path`
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write all records, replacing any existing file
    ///
    /// Returns the number of records written.
    pub fn write(&self, records: &[TradeRecord]) -> Result<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::output(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let file = File::create(&self.path).map_err(|e| {
            Error::output(format!("Failed to create file {}: {e}", self.path.display()))
        })?;
        let mut out = BufWriter::new(file);
        let write_failed = |e: &dyn std::fmt::Display| {
            Error::output(format!("Failed to write {}: {e}", self.path.display()))
        };

        match self.format {
            OutputFormat::Jsonl => {
                for record in records {
                    serde_json::to_writer(&mut out, record).map_err(|e| write_failed(&e))?;
                    out.write_all(b"\n").map_err(|e| write_failed(&e))?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, records).map_err(|e| write_failed(&e))?;
            }
        }

        out.flush().map_err(|e| write_failed(&e))?;

        Ok(records.len())
    }
}

/// Write records to `path` in the given format
pub fn write_trades(
    path: impl AsRef<Path>,
    records: &[TradeRecord],
    format: OutputFormat,
) -> Result<usize> {
    TradeWriter::new(path.as_ref(), format).write(records)
}
