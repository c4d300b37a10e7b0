//! Console summary of a run

use crate::filter::QueryFilter;
use crate::pagination::PaginationOutcome;
use crate::types::{Side, TradeRecord};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Aggregates printed after the trades are written
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub wallet: String,
    pub filters: Vec<String>,
    pub trades: usize,
    pub pages_fetched: u32,
    pub duplicates: u64,
    pub missing_key: u64,
    pub buys: usize,
    pub sells: usize,
    pub total_size: f64,
    pub notional: f64,
    pub markets: usize,
    pub first_trade: Option<DateTime<Utc>>,
    pub last_trade: Option<DateTime<Utc>>,
    pub hit_ceiling: bool,
    pub max_offset: u32,
    pub output: Option<PathBuf>,
}

impl Summary {
    /// Build a summary from a finished run
    pub fn new(filter: &QueryFilter, outcome: &PaginationOutcome, max_offset: u32) -> Self {
        let mut filters = Vec::new();
        if let Some(market) = &filter.market {
            filters.push(format!("market={market}"));
        }
        if let Some(event) = &filter.event {
            filters.push(format!("event={event}"));
        }
        if let Some(side) = filter.side {
            filters.push(format!("side={side}"));
        }

        let mut summary = Self {
            wallet: filter.user.to_string(),
            filters,
            trades: outcome.len(),
            pages_fetched: outcome.pages_fetched,
            duplicates: outcome.duplicates,
            missing_key: outcome.missing_key,
            buys: 0,
            sells: 0,
            total_size: 0.0,
            notional: 0.0,
            markets: 0,
            first_trade: None,
            last_trade: None,
            hit_ceiling: outcome.hit_ceiling,
            max_offset,
            output: None,
        };
        summary.tally(&outcome.records);
        summary
    }

    /// Attach the path the trades were written to
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    fn tally(&mut self, records: &[TradeRecord]) {
        let mut markets = HashSet::new();
        let mut first: Option<i64> = None;
        let mut last: Option<i64> = None;

        for record in records {
            match record.side() {
                Some(Side::Buy) => self.buys += 1,
                Some(Side::Sell) => self.sells += 1,
                None => {}
            }

            if let Some(size) = record.size() {
                self.total_size += size;
                if let Some(price) = record.price() {
                    self.notional += price * size;
                }
            }

            if let Some(market) = record.condition_id() {
                markets.insert(market);
            }

            if let Some(ts) = record.timestamp() {
                first = Some(first.map_or(ts, |f| f.min(ts)));
                last = Some(last.map_or(ts, |l| l.max(ts)));
            }
        }

        self.markets = markets.len();
        self.first_trade = first.and_then(|ts| DateTime::from_timestamp(ts, 0));
        self.last_trade = last.and_then(|ts| DateTime::from_timestamp(ts, 0));
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wallet:          {}", self.wallet)?;
        if !self.filters.is_empty() {
            writeln!(f, "Filters:         {}", self.filters.join(", "))?;
        }
        writeln!(f, "Trades:          {}", self.trades)?;
        writeln!(
            f,
            "Pages fetched:   {} ({} duplicates dropped)",
            self.pages_fetched, self.duplicates
        )?;
        if self.missing_key > 0 {
            writeln!(
                f,
                "Skipped:         {} trades without a transaction hash",
                self.missing_key
            )?;
        }
        writeln!(f, "Buys / Sells:    {} / {}", self.buys, self.sells)?;
        writeln!(f, "Total size:      {:.2}", self.total_size)?;
        writeln!(f, "Notional:        {:.2}", self.notional)?;
        writeln!(f, "Markets:         {}", self.markets)?;
        if let (Some(first), Some(last)) = (self.first_trade, self.last_trade) {
            writeln!(
                f,
                "Period:          {} .. {}",
                first.format("%Y-%m-%d %H:%M:%S UTC"),
                last.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        if let Some(path) = &self.output {
            writeln!(f, "Output:          {}", path.display())?;
        }
        if self.hit_ceiling {
            writeln!(f)?;
            writeln!(
                f,
                "Warning: stopped at the API offset ceiling ({}); older trades may exist.",
                self.max_offset
            )?;
            writeln!(
                f,
                "         Narrow the query with --market, --event or --side to reach them."
            )?;
        }
        Ok(())
    }
}
