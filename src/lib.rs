//! Prowl: a product-link discovery crawler
//!
//! This crate crawls many independent websites concurrently to discover
//! product-page links. Each domain gets its own deduplicated frontier and an
//! adaptive concurrency budget; a global scheduler bounds how many domains
//! run at once and how long each one may take.

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod output;
pub mod seeds;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Prowl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Failed to read seed file {path}: {source}")]
    SeedFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Seed file {path} contains no usable URLs")]
    EmptySeedList { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for Prowl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    ConcurrencyController, CrawlProgress, DomainOutcome, DomainReport, DomainScheduler, Frontier,
};
pub use fetcher::{CrawlResult, PageFetcher};
pub use output::{ProductRecord, ProductSink};
pub use url::{extract_domain, normalize_seed, resolve_link, ProductMatcher};
