//! Pagination types and traits
//!
//! Defines the page source abstraction, the offset state machine and the
//! deduplicating result set.

use crate::error::Result;
use crate::filter::QueryFilter;
use crate::types::TradeRecord;
use async_trait::async_trait;
use std::collections::HashSet;

/// Anything that can produce one page of trades at an offset
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page starting at `offset`
    async fn fetch_page(&self, filter: &QueryFilter, offset: u32) -> Result<Vec<TradeRecord>>;
}

/// What to do after a page has been merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Fetch the page at the new offset
    Continue,
    /// Short page: the API has nothing more
    EndOfData,
    /// Full page at the last allowed offset; more data may exist
    Ceiling,
}

/// Tracks offset and counters during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next (or current) page
    pub offset: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Records received before dedup
    pub records_received: u64,
    /// Records dropped as duplicates
    pub duplicates: u64,
    /// Records dropped for lacking a dedup key
    pub missing_key: u64,
}

impl PaginationState {
    /// Create a new pagination state at offset 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a merged page
    pub fn record_page(&mut self, received: usize, merged: &MergeStats) {
        self.pages_fetched += 1;
        self.records_received += received as u64;
        self.duplicates += merged.duplicates as u64;
        self.missing_key += merged.missing_key as u64;
    }

    /// Decide whether to continue after a page of `page_len` records
    ///
    /// Advances `offset` by `page_size` on [`NextStep::Continue`].
    pub fn advance(&mut self, page_len: usize, page_size: u32, max_offset: u32) -> NextStep {
        if page_len < page_size as usize {
            return NextStep::EndOfData;
        }

        let next = self.offset.saturating_add(page_size);
        if next > max_offset {
            return NextStep::Ceiling;
        }

        self.offset = next;
        NextStep::Continue
    }
}

/// Counts from merging one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub duplicates: usize,
    pub missing_key: usize,
}

/// Unique trades in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<TradeRecord>,
    seen: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records whose key has not been seen yet
    pub fn merge(&mut self, page: Vec<TradeRecord>) -> MergeStats {
        let mut stats = MergeStats::default();

        for record in page {
            let Some(key) = record.dedup_key() else {
                stats.missing_key += 1;
                continue;
            };

            if self.seen.insert(key.to_string()) {
                self.records.push(record);
                stats.added += 1;
            } else {
                stats.duplicates += 1;
            }
        }

        stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }
}

/// Result of a pagination run
#[derive(Debug, Clone)]
pub struct PaginationOutcome {
    /// Unique trades in first-seen order
    pub records: Vec<TradeRecord>,
    /// Stopped on a full page at the offset ceiling
    pub hit_ceiling: bool,
    /// Pages fetched
    pub pages_fetched: u32,
    /// Offset of the last page fetched
    pub last_offset: u32,
    /// Records received before dedup
    pub records_received: u64,
    /// Duplicates dropped
    pub duplicates: u64,
    /// Records dropped for lacking a dedup key
    pub missing_key: u64,
}

impl PaginationOutcome {
    pub(crate) fn new(results: ResultSet, state: &PaginationState, hit_ceiling: bool) -> Self {
        Self {
            records: results.into_records(),
            hit_ceiling,
            pages_fetched: state.pages_fetched,
            last_offset: state.offset,
            records_received: state.records_received,
            duplicates: state.duplicates,
            missing_key: state.missing_key,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
