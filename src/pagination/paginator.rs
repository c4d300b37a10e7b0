//! Offset paginator over the trades endpoint

use super::types::{NextStep, PageSource, PaginationOutcome, PaginationState, ResultSet};
use crate::config::FetchConfig;
use crate::error::Result;
use crate::filter::QueryFilter;
use crate::http::{HttpClient, PageFetcher};
use tracing::{debug, info, warn};

/// Walks offsets from 0 in `page_size` steps until a short page or the
/// offset ceiling, deduplicating by transaction hash.
///
/// Pages are fetched strictly one after another: whether to continue
/// depends on the size of the page just received.
#[derive(Debug)]
pub struct Paginator<S> {
    source: S,
    config: FetchConfig,
}

impl Paginator<PageFetcher<HttpClient>> {
    /// Paginator over the HTTP trades endpoint
    pub fn http(config: FetchConfig) -> Result<Self> {
        let fetcher = PageFetcher::http(config.clone())?;
        Self::new(fetcher, config)
    }
}

impl<S: PageSource> Paginator<S> {
    /// Create a paginator over any page source
    ///
    /// Fails if the config would not let the offset advance.
    pub fn new(source: S, config: FetchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every reachable trade for `filter`
    pub async fn run(&self, filter: &QueryFilter) -> Result<PaginationOutcome> {
        let mut results = ResultSet::new();
        let mut state = PaginationState::new();

        info!("Fetching trades for {}", filter.user);

        loop {
            let page = self.source.fetch_page(filter, state.offset).await?;
            let received = page.len();
            let merged = results.merge(page);
            state.record_page(received, &merged);

            if merged.missing_key > 0 {
                warn!(
                    "Offset {}: dropped {} trades without a transaction hash",
                    state.offset, merged.missing_key
                );
            }
            info!(
                "Offset {}: {} trades, {} new, {} total",
                state.offset,
                received,
                merged.added,
                results.len()
            );

            match state.advance(received, self.config.page_size, self.config.max_offset) {
                NextStep::Continue => {
                    debug!(
                        "Sleeping {:?} before offset {}",
                        self.config.request_delay, state.offset
                    );
                    tokio::time::sleep(self.config.request_delay).await;
                }
                NextStep::EndOfData => {
                    return Ok(PaginationOutcome::new(results, &state, false));
                }
                NextStep::Ceiling => {
                    warn!(
                        "Reached the offset ceiling ({}) with a full page; more trades may exist",
                        self.config.max_offset
                    );
                    return Ok(PaginationOutcome::new(results, &state, true));
                }
            }
        }
    }
}
