use std::path::PathBuf;

use crate::listing::NamePrecedence;
use crate::profit::ProfitConfig;

/// User agent sent when `ARBSCOUT_SCRAPER_USER_AGENT` is not set.
///
/// Listing pages serve a stripped-down or captcha body to obvious bots, so
/// the default mimics a desktop Chrome build.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_AMAZON_BASE_URL: &str = "https://www.amazon.com.be";

pub const DEFAULT_WHOLESALE_BASE_URL: &str = "https://www.eurolots.com/en";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub amazon_base_url: String,
    pub wholesale_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_accept_language: String,
    pub scraper_max_concurrent: usize,
    pub scraper_inter_request_delay_ms: u64,
    pub name_precedence: NamePrecedence,
    pub profit: ProfitConfig,
}
