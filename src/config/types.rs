use serde::Deserialize;

/// Main configuration structure for autoru-dump
///
/// Every section has defaults matching the reference deployment, so the
/// scraper runs without any configuration file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Target site and pagination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the listing (page 1)
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Query string appended for pages > 1; the page number follows directly
    #[serde(rename = "pagination-params")]
    pub pagination_params: String,

    /// Maximum number of listing pages processed per run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://auto.ru/cars/all/".to_string(),
            pagination_params: "?sort=fresh_relevance_1-desc&page=".to_string(),
            max_pages: 5,
        }
    }
}

/// Fetch validity and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Minimum character count of a fully rendered listing page; anything
    /// shorter is treated as a captcha or block interstitial
    #[serde(rename = "min-html-length")]
    pub min_html_length: usize,

    /// Retry budget per fetched URL
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Pause after a circuit rotation, in milliseconds
    #[serde(rename = "rotate-delay-ms")]
    pub rotate_delay_ms: u64,

    /// Spoofed client identity sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            min_html_length: 100_000,
            max_attempts: 5,
            rotate_delay_ms: 3000,
            user_agent: "googlebot".to_string(),
        }
    }
}

/// Tor proxy endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Route requests through the proxy; disable for direct access in
    /// development and tests
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// SOCKS5 endpoint of the local Tor daemon
    #[serde(rename = "socks-addr")]
    pub socks_addr: String,

    /// Control port used for circuit rotation
    #[serde(rename = "control-addr")]
    pub control_addr: String,

    /// Control port password; empty when cookie/no auth is configured
    #[serde(rename = "control-password", default)]
    pub control_password: String,
}

fn default_true() -> bool {
    true
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            socks_addr: "127.0.0.1:9050".to_string(),
            control_addr: "127.0.0.1:9051".to_string(),
            control_password: String::new(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the report is written to, created on demand
    pub dir: String,

    /// Report filename prefix; the save timestamp is appended
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            file_prefix: "autoru_dump".to_string(),
        }
    }
}

/// CSS selectors describing the listing markup
///
/// The markup contract lives in configuration so a layout change is a config
/// edit, and so the extractor can be exercised against synthetic fixtures.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// One repeated block per listed car
    pub item: String,

    /// Title link inside an item block; its href is the record URL
    pub title: String,

    /// Price element inside an item block
    pub price: String,

    /// Production year element inside an item block
    pub year: String,

    /// Mileage element inside an item block
    pub mileage: String,

    /// "Last page" button text inside the pagination control
    pub pages: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: "body .ListingItem-module__main".to_string(),
            title: ".ListingItemTitle-module__link".to_string(),
            price: ".ListingItemPrice-module__content".to_string(),
            year: ".ListingItem-module__year".to_string(),
            mileage: ".ListingItem-module__kmAge".to_string(),
            pages: ".ListingPagination-module__pages .Button:last-child .Button__text"
                .to_string(),
        }
    }
}
