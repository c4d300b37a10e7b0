//! CLI runner - fetches, writes and summarizes

use crate::cli::commands::Cli;
use crate::config::FetchConfig;
use crate::error::{Result, ResultExt};
use crate::filter::QueryFilter;
use crate::output::{default_output_path, Summary, TradeWriter};
use crate::pagination::Paginator;
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run and print the summary to stdout
    pub async fn run(&self) -> Result<()> {
        let summary = self.execute().await?;
        print!("{summary}");
        Ok(())
    }

    /// Fetch all trades, write them and return the summary
    pub async fn execute(&self) -> Result<Summary> {
        let config = self.load_config()?;
        let filter = self.filter();
        let path = self.output_path();

        let paginator = Paginator::http(config.clone())?;
        let outcome = paginator.run(&filter).await?;

        let writer = TradeWriter::new(&path, self.cli.format);
        let written = writer
            .write(&outcome.records)
            .with_context(|| format!("Failed to save trades to {}", path.display()))?;
        info!("Wrote {} trades to {}", written, path.display());

        Ok(Summary::new(&filter, &outcome, config.max_offset).with_output(path))
    }

    /// Load configuration
    pub fn load_config(&self) -> Result<FetchConfig> {
        match &self.cli.config {
            Some(path) => FetchConfig::from_file(path),
            None => Ok(FetchConfig::default()),
        }
    }

    /// Query filter from the arguments
    pub fn filter(&self) -> QueryFilter {
        let mut filter = QueryFilter::new(self.cli.address.clone());
        if let Some(market) = &self.cli.market {
            filter = filter.market(market.as_str());
        }
        if let Some(event) = &self.cli.event {
            filter = filter.event(event.as_str());
        }
        if let Some(side) = self.cli.side {
            filter = filter.side(side);
        }
        filter
    }

    /// Where the trades file goes
    pub fn output_path(&self) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.cli.address, self.cli.format))
    }
}
