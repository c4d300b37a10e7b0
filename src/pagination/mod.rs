//! Pagination module
//!
//! # Overview
//!
//! The trades endpoint is offset paginated with a hard offset ceiling.
//! [`Paginator`] steps through it page by page, merging each page into a
//! [`ResultSet`] that keeps the first occurrence of every transaction hash,
//! and reports whether it stopped at the ceiling rather than at the end of
//! the data.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{
    MergeStats, NextStep, PageSource, PaginationOutcome, PaginationState, ResultSet,
};
