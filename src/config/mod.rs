//! Configuration module for Prowl
//!
//! Handles loading, parsing, and validating TOML configuration files. Every
//! option carries a default, so running without a config file (or with an
//! empty one) is valid.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, FetcherConfig, InputConfig, OutputConfig};
