//! Crawl orchestration engine
//!
//! The pieces, leaves first: a per-domain [`Frontier`] (deduplicated FIFO
//! queue), an adaptive [`ConcurrencyController`], the
//! [`DomainCrawlUnit`] dispatch loop that drains one domain with a single
//! retry pass, and the [`DomainScheduler`] that runs many units under a
//! global admission limit and per-domain wall-clock timeout.

mod controller;
mod frontier;
mod scheduler;
mod unit;

pub use controller::ConcurrencyController;
pub use frontier::Frontier;
pub use scheduler::DomainScheduler;
pub use unit::{CrawlProgress, DomainCrawlUnit, DomainOutcome, DomainReport};
