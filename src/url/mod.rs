//! URL handling module for Prowl
//!
//! Provides domain extraction (with `www.` normalization), link resolution
//! with fragment stripping, and product-pattern matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, normalize_host};
pub use matcher::{contains_blocked_keyword, ProductMatcher};
pub use normalize::{normalize_seed, resolve_link};
