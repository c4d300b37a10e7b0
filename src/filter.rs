//! Query filters for the trades endpoint

use crate::error::{Error, Result};
use crate::types::Side;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"));

/// A validated wallet address (`0x` + 40 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for WalletAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if ADDRESS_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidAddress {
                address: s.to_string(),
            })
        }
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters selecting which trades to fetch
///
/// Fixed for the lifetime of a pagination run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    pub user: WalletAddress,
    pub market: Option<String>,
    pub event: Option<String>,
    pub side: Option<Side>,
}

impl QueryFilter {
    /// Create a filter for a wallet with no optional filters
    pub fn new(user: WalletAddress) -> Self {
        Self {
            user,
            market: None,
            event: None,
            side: None,
        }
    }

    /// Restrict to a market (condition id)
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = non_empty(market.into());
        self
    }

    /// Restrict to an event
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = non_empty(event.into());
        self
    }

    /// Restrict to one side
    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Query parameters for one page request
    ///
    /// Absent filters are left out entirely rather than sent empty.
    pub fn query_params(&self, limit: u32, offset: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("user".to_string(), self.user.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        if let Some(market) = &self.market {
            params.push(("market".to_string(), market.clone()));
        }
        if let Some(event) = &self.event {
            params.push(("event".to_string(), event.clone()));
        }
        if let Some(side) = self.side {
            params.push(("side".to_string(), side.to_string()));
        }
        params
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
