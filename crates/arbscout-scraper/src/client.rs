use std::time::Duration;

use arbscout_core::{AmazonListing, AppConfig, FetchStatus, Identifier, WholesaleListing};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};

use crate::error::ScraperError;
use crate::extract::{parse_amazon_page, parse_wholesale_page};
use crate::rate_limit::RequestPacer;

/// Upper bound on the TCP/TLS connect phase, independent of the request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`ListingClient`].
#[derive(Debug, Clone)]
pub struct ListingClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Minimum spacing between request starts; `0` disables pacing.
    pub inter_request_delay_ms: u64,
    /// Scheme and host of the Amazon marketplace, e.g. `https://www.amazon.com.be`.
    pub amazon_base_url: String,
    /// Prefix of the wholesale site's search endpoint, e.g. `https://www.eurolots.com/en`.
    pub wholesale_base_url: String,
}

impl ListingClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.scraper_request_timeout_secs,
            user_agent: config.scraper_user_agent.clone(),
            accept_language: config.scraper_accept_language.clone(),
            inter_request_delay_ms: config.scraper_inter_request_delay_ms,
            amazon_base_url: config.amazon_base_url.clone(),
            wholesale_base_url: config.wholesale_base_url.clone(),
        }
    }
}

/// HTTP client for the two listing sources.
///
/// Sends a browser-like header set on every request and routes all requests
/// through one shared pacer. The source-level methods never fail: a non-200
/// answer or a network error produces a listing that carries only the
/// identifier, the requested URL and a [`FetchStatus`] describing what
/// went wrong.
pub struct ListingClient {
    client: Client,
    pacer: RequestPacer,
    amazon_base_url: String,
    wholesale_base_url: String,
}

impl ListingClient {
    /// Creates a `ListingClient` with the configured timeout, headers and pacing.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if `accept_language` is not a
    /// valid header value, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(config: &ListingClientConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).map_err(|e| {
                ScraperError::InvalidHeader {
                    name: "Accept-Language",
                    reason: e.to_string(),
                }
            })?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(config.timeout_secs.max(1)),
            ))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            pacer: RequestPacer::new(Duration::from_millis(config.inter_request_delay_ms)),
            amazon_base_url: config.amazon_base_url.trim_end_matches('/').to_owned(),
            wholesale_base_url: config.wholesale_base_url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn amazon_url(&self, identifier: &Identifier) -> String {
        amazon_url(&self.amazon_base_url, identifier)
    }

    #[must_use]
    pub fn wholesale_search_url(&self, identifier: &Identifier) -> String {
        wholesale_search_url(&self.wholesale_base_url, identifier)
    }

    /// Fetches and extracts the Amazon listing for `identifier`.
    pub async fn fetch_amazon(&self, identifier: &Identifier) -> AmazonListing {
        let url = self.amazon_url(identifier);
        tracing::info!(identifier = %identifier, url = %url, "fetching amazon listing");

        match self.fetch_html(&url).await {
            Ok(body) => parse_amazon_page(identifier.clone(), url, &body),
            Err(err) => {
                let status = degraded_status(&err, "amazon", identifier);
                AmazonListing::empty(identifier.clone(), url, status)
            }
        }
    }

    /// Fetches the wholesale search page for `identifier` and extracts the
    /// first matching product.
    pub async fn fetch_wholesale(&self, identifier: &Identifier) -> WholesaleListing {
        let url = self.wholesale_search_url(identifier);
        tracing::info!(identifier = %identifier, url = %url, "fetching wholesale listing");

        match self.fetch_html(&url).await {
            Ok(body) => parse_wholesale_page(identifier.clone(), url, &body),
            Err(err) => {
                let status = degraded_status(&err, "wholesale", identifier);
                WholesaleListing::empty(identifier.clone(), url, status)
            }
        }
    }

    /// GETs `url` and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any status other than 200.
    /// - [`ScraperError::Http`] — connect failure, timeout, or body read failure.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        self.pacer.wait().await;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Product detail page URL: `<amazon-base>/dp/<identifier>`.
#[must_use]
pub fn amazon_url(base_url: &str, identifier: &Identifier) -> String {
    format!(
        "{}/dp/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(identifier.as_str(), NON_ALPHANUMERIC)
    )
}

/// Search results URL: `<wholesale-base>/search?s=<identifier>`.
#[must_use]
pub fn wholesale_search_url(base_url: &str, identifier: &Identifier) -> String {
    format!(
        "{}/search?s={}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(identifier.as_str(), NON_ALPHANUMERIC)
    )
}

/// Maps a fetch error to the status recorded on a partial listing, logging
/// a non-200 answer as a warning and a transport failure as an error.
fn degraded_status(err: &ScraperError, site: &'static str, identifier: &Identifier) -> FetchStatus {
    match err {
        ScraperError::UnexpectedStatus { status, url } => {
            tracing::warn!(
                site,
                identifier = %identifier,
                url = %url,
                status,
                "listing request returned non-200 status; keeping partial record"
            );
            FetchStatus::Unavailable { status: *status }
        }
        ScraperError::Http(_) | ScraperError::InvalidHeader { .. } => {
            tracing::error!(
                site,
                identifier = %identifier,
                error = %err,
                "listing request failed; keeping partial record"
            );
            FetchStatus::Failed
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
