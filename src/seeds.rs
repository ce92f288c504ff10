//! Seed-list loading
//!
//! Seeds come from a newline-delimited file of absolute URLs. Blank lines
//! are ignored; lines that fail to parse are logged and skipped. A missing
//! file, or a file with no usable URLs, is fatal to the whole run.

use crate::url::{extract_domain, normalize_seed};
use crate::CrawlError;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Loads seed URLs from a file and groups them by domain
///
/// # Arguments
///
/// * `path` - Path to the newline-delimited seed file
///
/// # Returns
///
/// * `Ok(map)` - Domain → seed URLs for that domain, in file order
/// * `Err(CrawlError)` - The file is missing, unreadable, or yields no
///   usable URLs
pub fn load_seeds(path: &Path) -> crate::Result<HashMap<String, Vec<Url>>> {
    let content =
        std::fs::read_to_string(path).map_err(|source| CrawlError::SeedFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let mut by_domain: HashMap<String, Vec<Url>> = HashMap::new();
    let mut total = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let url = match normalize_seed(line) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping invalid seed URL '{}': {}", line, e);
                continue;
            }
        };

        let Some(domain) = extract_domain(&url) else {
            tracing::warn!("Skipping seed URL without a host: {}", line);
            continue;
        };

        by_domain.entry(domain).or_default().push(url);
        total += 1;
    }

    if by_domain.is_empty() {
        return Err(CrawlError::EmptySeedList {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(
        "Loaded {} seed URLs across {} domains from {}",
        total,
        by_domain.len(),
        path.display()
    );

    Ok(by_domain)
}
