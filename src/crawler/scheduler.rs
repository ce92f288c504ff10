//! Domain Scheduler
//!
//! Runs one Domain Crawl Unit per seed domain, bounded by a counting
//! admission semaphore of `domain-concurrency-limit` slots and a per-domain
//! wall-clock timeout. Domains share nothing but the admission slots and the
//! fetcher's resource pool; one domain failing or timing out never blocks a
//! sibling beyond waiting for a slot.

use crate::config::CrawlerConfig;
use crate::crawler::unit::{CrawlProgress, DomainCrawlUnit, DomainReport};
use crate::fetcher::PageFetcher;
use crate::output::ProductSink;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Admits and supervises per-domain crawl units
pub struct DomainScheduler {
    config: CrawlerConfig,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn ProductSink>,
}

impl DomainScheduler {
    /// Creates a scheduler sharing one fetcher and one sink across domains
    pub fn new(
        config: CrawlerConfig,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn ProductSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
        }
    }

    /// Crawls every seed domain and returns one report per domain
    ///
    /// Each domain waits for an admission slot, runs its unit under the
    /// wall-clock timeout, and releases the slot regardless of outcome.
    /// Reports come back sorted by domain for stable presentation.
    pub async fn run(&self, seeds_by_domain: HashMap<String, Vec<Url>>) -> Vec<DomainReport> {
        let admission = Arc::new(Semaphore::new(self.config.domain_concurrency_limit));
        let mut units: JoinSet<DomainReport> = JoinSet::new();

        tracing::info!(
            "Scheduling {} domains ({} concurrent)",
            seeds_by_domain.len(),
            self.config.domain_concurrency_limit
        );

        for (domain, seeds) in seeds_by_domain {
            let admission = Arc::clone(&admission);
            let fetcher = Arc::clone(&self.fetcher);
            let sink = Arc::clone(&self.sink);
            let config = self.config.clone();

            units.spawn(async move {
                // The semaphore lives for the whole run and is never
                // closed, so acquisition only fails on shutdown bugs.
                let _slot = match admission.acquire_owned().await {
                    Ok(slot) => slot,
                    Err(_) => {
                        tracing::error!("Admission slots closed before {} could run", domain);
                        return DomainReport::timed_out(domain, &CrawlProgress::default());
                    }
                };

                tracing::info!("Admitted domain {}", domain);
                let unit = DomainCrawlUnit::new(domain.clone(), &config, fetcher, sink);
                // Held across the timeout so a cancelled unit's counters
                // survive into its report.
                let progress = unit.progress();

                match tokio::time::timeout(config.domain_timeout(), unit.run(seeds)).await {
                    Ok(report) => report,
                    Err(_) => {
                        tracing::error!(
                            "Domain {} exceeded its {}h wall-clock budget after {} pages, cancelling",
                            domain,
                            config.domain_scraping_timeout_hours,
                            progress.pages_processed()
                        );
                        DomainReport::timed_out(domain, &progress)
                    }
                }
                // _slot drops here; the next waiting domain is admitted.
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!("Domain task failed unexpectedly: {}", e),
            }
        }

        reports.sort_by(|a, b| a.domain.cmp(&b.domain));
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::unit::DomainOutcome;
    use crate::fetcher::CrawlResult;
    use crate::output::ProductRecord;
    use crate::OutputError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct NullSink;

    impl ProductSink for NullSink {
        fn append(&self, _record: &ProductRecord) -> Result<(), OutputError> {
            Ok(())
        }
    }

    fn test_config(domain_concurrency: usize) -> CrawlerConfig {
        CrawlerConfig {
            auto_scale: false,
            max_concurrency_limit: 4,
            domain_concurrency_limit: domain_concurrency,
            domain_scraping_timeout_hours: 1,
            url_task_timeout_seconds: 30,
            product_url_patterns: vec!["/p/".to_string()],
        }
    }

    fn seeds(entries: &[(&str, &str)]) -> HashMap<String, Vec<Url>> {
        let mut map: HashMap<String, Vec<Url>> = HashMap::new();
        for (domain, url) in entries {
            map.entry(domain.to_string())
                .or_default()
                .push(Url::parse(url).unwrap());
        }
        map
    }

    #[tokio::test]
    async fn test_failing_domain_does_not_block_sibling() {
        /// Fails everything under bad.example, succeeds elsewhere
        struct SplitFetcher;

        #[async_trait]
        impl PageFetcher for SplitFetcher {
            async fn fetch(&self, url: &Url) -> CrawlResult {
                if url.host_str() == Some("bad.example") {
                    CrawlResult::failure()
                } else {
                    CrawlResult::success(vec![])
                }
            }
        }

        let scheduler = DomainScheduler::new(
            test_config(2),
            Arc::new(SplitFetcher),
            Arc::new(NullSink),
        );

        let reports = scheduler
            .run(seeds(&[
                ("bad.example", "https://bad.example/"),
                ("good.example", "https://good.example/"),
            ]))
            .await;

        assert_eq!(reports.len(), 2);
        let bad = reports.iter().find(|r| r.domain == "bad.example").unwrap();
        let good = reports.iter().find(|r| r.domain == "good.example").unwrap();

        assert_eq!(bad.outcome, DomainOutcome::Completed);
        assert_eq!(bad.abandoned_urls, vec!["https://bad.example/"]);
        assert_eq!(good.outcome, DomainOutcome::Completed);
        assert!(good.abandoned_urls.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_domain_timeout_is_isolated() {
        /// Hangs forever under stuck.example, succeeds elsewhere
        struct HangingFetcher;

        #[async_trait]
        impl PageFetcher for HangingFetcher {
            async fn fetch(&self, url: &Url) -> CrawlResult {
                if url.host_str() == Some("stuck.example") {
                    tokio::time::sleep(Duration::from_secs(1_000_000)).await;
                }
                CrawlResult::success(vec![])
            }
        }

        // Task timeout longer than the domain budget, so the domain
        // wall-clock timeout is what fires.
        let mut config = test_config(2);
        config.url_task_timeout_seconds = 100_000_000;

        let scheduler =
            DomainScheduler::new(config, Arc::new(HangingFetcher), Arc::new(NullSink));

        let reports = scheduler
            .run(seeds(&[
                ("stuck.example", "https://stuck.example/"),
                ("fast.example", "https://fast.example/"),
            ]))
            .await;

        let stuck = reports.iter().find(|r| r.domain == "stuck.example").unwrap();
        let fast = reports.iter().find(|r| r.domain == "fast.example").unwrap();

        assert_eq!(stuck.outcome, DomainOutcome::TimedOut);
        assert_eq!(fast.outcome, DomainOutcome::Completed);
        assert_eq!(fast.pages_processed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_domain_reports_progress_made() {
        /// Serves the seed and a product page, then hangs on /hang
        struct PartialFetcher;

        #[async_trait]
        impl PageFetcher for PartialFetcher {
            async fn fetch(&self, url: &Url) -> CrawlResult {
                match url.path() {
                    "/" => CrawlResult::success(vec![
                        "/p/1".to_string(),
                        "/hang".to_string(),
                    ]),
                    "/hang" => {
                        tokio::time::sleep(Duration::from_secs(1_000_000)).await;
                        CrawlResult::success(vec![])
                    }
                    _ => CrawlResult::success(vec![]),
                }
            }
        }

        let mut config = test_config(1);
        config.url_task_timeout_seconds = 100_000_000;

        let scheduler =
            DomainScheduler::new(config, Arc::new(PartialFetcher), Arc::new(NullSink));

        let reports = scheduler
            .run(seeds(&[("stuck.example", "https://stuck.example/")]))
            .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, DomainOutcome::TimedOut);
        // The seed and /p/1 completed before the budget expired; the
        // cancelled crawl still accounts for them.
        assert_eq!(reports[0].pages_processed, 2);
        assert_eq!(reports[0].product_links_found, 1);
    }

    #[tokio::test]
    async fn test_admission_limit_respected() {
        /// Tracks the highest number of domains fetching at once
        struct GaugeFetcher {
            active: AtomicUsize,
            peak: AtomicUsize,
            domains_seen: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl PageFetcher for GaugeFetcher {
            async fn fetch(&self, url: &Url) -> CrawlResult {
                let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak.fetch_max(now, Ordering::SeqCst);
                self.domains_seen
                    .lock()
                    .unwrap()
                    .push(url.host_str().unwrap_or("").to_string());

                tokio::time::sleep(Duration::from_millis(10)).await;

                self.active.fetch_sub(1, Ordering::SeqCst);
                CrawlResult::success(vec![])
            }
        }

        let fetcher = Arc::new(GaugeFetcher {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            domains_seen: Mutex::new(Vec::new()),
        });

        let scheduler =
            DomainScheduler::new(test_config(1), fetcher.clone(), Arc::new(NullSink));

        let reports = scheduler
            .run(seeds(&[
                ("one.example", "https://one.example/"),
                ("two.example", "https://two.example/"),
                ("three.example", "https://three.example/"),
            ]))
            .await;

        assert_eq!(reports.len(), 3);
        // With one admission slot and one seed per domain, fetches never
        // overlap across domains.
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.domains_seen.lock().unwrap().len(), 3);
    }
}
