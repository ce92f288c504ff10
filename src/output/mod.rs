//! Output module for product-link records
//!
//! One record is written per processed URL that yielded at least one
//! product link. Records go to an append-only JSONL file per domain; the
//! sink is injected into each Domain Crawl Unit at construction, so no
//! component writes through process-global state.

mod jsonl;

pub use jsonl::JsonlSink;

use crate::OutputError;
use serde::Serialize;

/// One output line: product links discovered on a single parent page
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    /// Normalized domain the parent page belongs to
    pub domain: String,

    /// URL of the page the product links were found on
    pub parent_link: String,

    /// Number of product links in this record
    pub count: usize,

    /// The product-page URLs themselves
    pub product_links: Vec<String>,
}

/// Destination for product records
///
/// Implementations must tolerate concurrent appends from multiple domains.
/// A write failure is reported to the caller, which logs and continues; it
/// never aborts a crawl.
pub trait ProductSink: Send + Sync {
    /// Appends one record
    fn append(&self, record: &ProductRecord) -> Result<(), OutputError>;
}
