//! Per-domain URL frontier
//!
//! A FIFO queue of pending URLs plus a seen-set, owned by exactly one
//! Domain Crawl Unit. Completed tasks feed discovered links back in while
//! the dispatch loop consumes, so the check-and-insert against the seen-set
//! is one mutex region per batch. Invariants: a URL enters the seen-set at
//! most once; the queue never holds a cross-domain URL or one already seen.

use crate::url::{extract_domain, resolve_link};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

struct FrontierInner {
    queue: VecDeque<Url>,
    seen: HashSet<String>,
}

/// Deduplicated pending-URL queue for one domain
pub struct Frontier {
    domain: String,
    inner: Mutex<FrontierInner>,
    notify: Notify,
}

impl Frontier {
    /// Creates an empty frontier owning the given normalized domain
    pub fn new(domain: String) -> Self {
        Self {
            domain,
            inner: Mutex::new(FrontierInner {
                queue: VecDeque::new(),
                seen: HashSet::new(),
            }),
            notify: Notify::new(),
        }
    }

    /// The domain this frontier belongs to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Resolves, filters, and enqueues a batch of discovered links
    ///
    /// Each candidate is resolved against `base` and has its fragment
    /// stripped. Candidates whose domain differs from this frontier's
    /// domain, or that are already in the seen-set, are dropped. The rest
    /// enter the seen-set and the queue in input order.
    ///
    /// # Arguments
    ///
    /// * `candidates` - Raw link strings, absolute or relative
    /// * `base` - The page URL the links were extracted from
    ///
    /// # Returns
    ///
    /// The URLs that were actually accepted, in queue order.
    pub fn enqueue(&self, candidates: &[String], base: &Url) -> Vec<Url> {
        let mut accepted = Vec::new();

        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

            for raw in candidates {
                let url = match resolve_link(base, raw) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::debug!("Dropping unresolvable link '{}': {}", raw, e);
                        continue;
                    }
                };

                match extract_domain(&url) {
                    Some(domain) if domain == self.domain => {}
                    _ => continue,
                }

                if !inner.seen.insert(url.as_str().to_string()) {
                    continue;
                }

                inner.queue.push_back(url.clone());
                accepted.push(url);
            }
        }

        for _ in 0..accepted.len() {
            self.notify.notify_one();
        }

        accepted
    }

    /// Pushes already-seen URLs back onto the queue for the retry pass
    ///
    /// Bypasses the seen-set check; callers use this exactly once per domain
    /// crawl, with the URLs that failed the initial pass.
    pub fn requeue(&self, urls: Vec<Url>) {
        let count = urls.len();

        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            for url in urls {
                inner.queue.push_back(url);
            }
        }

        for _ in 0..count {
            self.notify.notify_one();
        }
    }

    /// Removes and returns the oldest pending URL, waiting if none is ready
    pub async fn dequeue(&self) -> Url {
        loop {
            // Register interest before checking, so a concurrent enqueue
            // between the check and the await cannot be missed.
            let notified = self.notify.notified();

            {
                let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(url) = inner.queue.pop_front() {
                    return url;
                }
            }

            notified.await;
        }
    }

    /// Snapshot: whether the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queue
            .is_empty()
    }

    /// Snapshot: number of URLs currently queued
    pub fn size(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queue
            .len()
    }
}
