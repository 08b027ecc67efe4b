//! Offline helpers: scoring a single price pair and running the extractor on
//! a saved page. Neither touches the network.

use std::path::Path;

use anyhow::Context;
use arbscout_core::{calculate_profitability, AppConfig, Identifier, ProfitConfig};
use serde_json::{json, Value};

use crate::Site;

/// Pretty-printed JSON for one scored price pair. When the pair cannot be
/// scored every field is `null`, matching the empty cells of a batch row.
pub(crate) fn score_report(
    amazon_price: Option<f64>,
    source_price: Option<f64>,
    profit: &ProfitConfig,
) -> anyhow::Result<String> {
    let value = match calculate_profitability(amazon_price, source_price, profit) {
        Some(result) => serde_json::to_value(result)?,
        None => json!({
            "total_cost": Value::Null,
            "fees": Value::Null,
            "net_profit": Value::Null,
            "margin": Value::Null,
            "roi": Value::Null,
            "recommendation": Value::Null,
        }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Pretty-printed JSON listing extracted from the HTML file at `path`.
pub(crate) fn extract_report(
    config: &AppConfig,
    site: Site,
    path: &Path,
    identifier: &str,
) -> anyhow::Result<String> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read HTML file {}", path.display()))?;
    let identifier = Identifier::parse(identifier)
        .ok_or_else(|| anyhow::anyhow!("identifier must not be blank"))?;

    let json = match site {
        Site::Amazon => {
            let url = arbscout_scraper::amazon_url(&config.amazon_base_url, &identifier);
            serde_json::to_string_pretty(&arbscout_scraper::parse_amazon_page(
                identifier, url, &html,
            ))?
        }
        Site::Wholesale => {
            let url =
                arbscout_scraper::wholesale_search_url(&config.wholesale_base_url, &identifier);
            serde_json::to_string_pretty(&arbscout_scraper::parse_wholesale_page(
                identifier, url, &html,
            ))?
        }
    };
    Ok(json)
}
