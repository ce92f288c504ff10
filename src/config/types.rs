use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Prowl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Orchestration-engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Derive the initial per-domain concurrency from available parallelism
    #[serde(rename = "auto-scale", default = "default_auto_scale")]
    pub auto_scale: bool,

    /// Upper bound on per-domain task concurrency
    #[serde(rename = "max-concurrency-limit", default = "default_max_concurrency")]
    pub max_concurrency_limit: usize,

    /// How many domains may crawl at the same time
    #[serde(
        rename = "domain-concurrency-limit",
        default = "default_domain_concurrency"
    )]
    pub domain_concurrency_limit: usize,

    /// Wall-clock budget for one domain's entire crawl (hours)
    #[serde(
        rename = "domain-scraping-timeout-hours",
        default = "default_domain_timeout_hours"
    )]
    pub domain_scraping_timeout_hours: u64,

    /// Hard timeout for one URL task, fetch included (seconds)
    #[serde(
        rename = "url-task-timeout-seconds",
        default = "default_url_task_timeout"
    )]
    pub url_task_timeout_seconds: u64,

    /// Substrings that identify a URL as a product page
    #[serde(rename = "product-url-patterns", default = "default_product_patterns")]
    pub product_url_patterns: Vec<String>,
}

/// Page-fetcher configuration
///
/// `max-scroll-count`, `headless-mode` and `blocked-resource-types` are
/// recognized for browser-based fetcher implementations; the bundled HTTP
/// fetcher does not consume them.
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Timeout for a single fetch attempt (milliseconds)
    #[serde(
        rename = "page-fetch-timeout-ms",
        default = "default_page_fetch_timeout_ms"
    )]
    pub page_fetch_timeout_ms: u64,

    /// Attempts made inside the fetcher before it reports failure
    #[serde(rename = "max-fetch-retries", default = "default_max_fetch_retries")]
    pub max_fetch_retries: u32,

    /// Initial delay between fetch attempts; doubles per attempt (seconds)
    #[serde(
        rename = "retry-backoff-base-seconds",
        default = "default_retry_backoff_base"
    )]
    pub retry_backoff_base_seconds: u64,

    /// Maximum scrolls when loading dynamic content (browser fetchers)
    #[serde(rename = "max-scroll-count", default = "default_max_scroll_count")]
    pub max_scroll_count: u32,

    /// Run the browser without a visible window (browser fetchers)
    #[serde(rename = "headless-mode", default = "default_headless_mode")]
    pub headless_mode: bool,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Resource types a browser fetcher should abort (images, media, ...)
    #[serde(
        rename = "blocked-resource-types",
        default = "default_blocked_resources"
    )]
    pub blocked_resource_types: Vec<String>,

    /// URL substrings identifying ad/tracking endpoints to skip
    #[serde(
        rename = "blocked-keyword-substrings",
        default = "default_blocked_keywords"
    )]
    pub blocked_keyword_substrings: Vec<String>,
}

/// Input configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Newline-delimited list of absolute seed URLs
    #[serde(rename = "seed-file", default = "default_seed_file")]
    pub seed_file: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives one timestamped subdirectory per run
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl CrawlerConfig {
    /// Wall-clock budget for one domain as a `Duration`
    pub fn domain_timeout(&self) -> Duration {
        Duration::from_secs(self.domain_scraping_timeout_hours * 3600)
    }

    /// Per-URL task timeout as a `Duration`
    pub fn url_task_timeout(&self) -> Duration {
        Duration::from_secs(self.url_task_timeout_seconds)
    }
}

impl FetcherConfig {
    /// Single fetch attempt timeout as a `Duration`
    pub fn page_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.page_fetch_timeout_ms)
    }
}

fn default_auto_scale() -> bool {
    true
}

fn default_max_concurrency() -> usize {
    32
}

fn default_domain_concurrency() -> usize {
    3
}

fn default_domain_timeout_hours() -> u64 {
    5
}

fn default_url_task_timeout() -> u64 {
    150
}

fn default_product_patterns() -> Vec<String> {
    ["/p/", "/products/", "/product/", "/dp/"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_page_fetch_timeout_ms() -> u64 {
    120_000
}

fn default_max_fetch_retries() -> u32 {
    3
}

fn default_retry_backoff_base() -> u64 {
    2
}

fn default_max_scroll_count() -> u32 {
    500
}

fn default_headless_mode() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_blocked_resources() -> Vec<String> {
    ["image", "stylesheet", "media", "font", "script", "xhr", "fetch"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_blocked_keywords() -> Vec<String> {
    [
        "google-analytics",
        "facebook.com/tr",
        "doubleclick.net",
        "adservice",
        "tracking",
        "pixel",
        "cdn-cgi",
        "newrelic",
        "gtag",
        "adsystem",
        "amazon-adsystem",
        "bing.com",
        "akamaihd.net",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_seed_file() -> String {
    "data/start_urls.txt".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            auto_scale: default_auto_scale(),
            max_concurrency_limit: default_max_concurrency(),
            domain_concurrency_limit: default_domain_concurrency(),
            domain_scraping_timeout_hours: default_domain_timeout_hours(),
            url_task_timeout_seconds: default_url_task_timeout(),
            product_url_patterns: default_product_patterns(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_fetch_timeout_ms: default_page_fetch_timeout_ms(),
            max_fetch_retries: default_max_fetch_retries(),
            retry_backoff_base_seconds: default_retry_backoff_base(),
            max_scroll_count: default_max_scroll_count(),
            headless_mode: default_headless_mode(),
            user_agent: default_user_agent(),
            blocked_resource_types: default_blocked_resources(),
            blocked_keyword_substrings: default_blocked_keywords(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            fetcher: FetcherConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
