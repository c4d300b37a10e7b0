//! Single-page fetch with bounded retry
//!
//! Rate limiting (429) and server errors (5xx) are retried with an
//! exponential backoff based on the inter-page delay. Any other failure
//! status ends the fetch at once.

use super::client::{HttpClient, RawResponse, Transport};
use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::filter::QueryFilter;
use crate::pagination::PageSource;
use crate::types::{JsonValue, TradeRecord};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Fetches pages of trades through a [`Transport`]
pub struct PageFetcher<T> {
    transport: T,
    config: FetchConfig,
}

impl PageFetcher<HttpClient> {
    /// Fetcher over a fresh reqwest client
    pub fn http(config: FetchConfig) -> Result<Self> {
        let transport = HttpClient::with_config(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> PageFetcher<T> {
    /// Create a fetcher over any transport
    pub fn new(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    /// Active configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the page starting at `offset`
    pub async fn fetch(&self, filter: &QueryFilter, offset: u32) -> Result<Vec<TradeRecord>> {
        let params = filter.query_params(self.config.page_size, offset);
        let mut attempt = 0;

        loop {
            let response = self.transport.get(&self.config.base_url, &params).await?;

            if response.is_success() {
                debug!("Fetched offset {} (status {})", offset, response.status);
                return parse_page(&response);
            }

            let status = response.status;
            let error = Error::http_status(status, response.reason);
            if !error.is_retryable() {
                return Err(error);
            }

            attempt += 1;
            if attempt > self.config.max_retries {
                return Err(Error::RetriesExhausted {
                    offset,
                    attempts: attempt,
                    status,
                });
            }

            let delay = self.config.backoff_delay(attempt);
            warn!(
                "Offset {} failed ({}), retry {}/{} in {:?}",
                offset, error, attempt, self.config.max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<T: Transport> PageSource for PageFetcher<T> {
    async fn fetch_page(&self, filter: &QueryFilter, offset: u32) -> Result<Vec<TradeRecord>> {
        self.fetch(filter, offset).await
    }
}

impl<T> std::fmt::Debug for PageFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode a successful body into trade records
pub(crate) fn parse_page(response: &RawResponse) -> Result<Vec<TradeRecord>> {
    if response.body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<JsonValue> = serde_json::from_str(&response.body)
        .map_err(|e| Error::decode(format!("Expected a JSON array of trades: {e}")))?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            TradeRecord::from_value(value)
                .ok_or_else(|| Error::decode(format!("Trade at index {i} is not a JSON object")))
        })
        .collect()
}
