pub mod app_config;
pub mod config;
pub mod listing;
pub mod profit;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{
    AmazonListing, FetchStatus, Identifier, MergedRecord, NamePrecedence, WholesaleListing,
};
pub use profit::{calculate_profitability, ProfitConfig, Profitability, Recommendation};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
