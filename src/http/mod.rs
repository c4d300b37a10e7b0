//! HTTP module
//!
//! Provides the transport to the trades endpoint and the page fetcher that
//! layers retry with exponential backoff on top of it.

mod client;
mod fetcher;

pub use client::{HttpClient, RawResponse, Transport};
pub use fetcher::PageFetcher;
