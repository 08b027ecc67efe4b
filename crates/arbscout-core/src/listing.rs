//! Per-source listings and the merged per-identifier record.
//!
//! A listing is whatever one site told us about one identifier. Every field
//! except the identifier and the URL we asked for is optional: a missing
//! element on the page leaves the field `None`, it never fails the record.

use serde::Serialize;

use crate::profit::{calculate_profitability, ProfitConfig, Profitability};

/// Product key shared by both sources (an ASIN).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Trims `raw` and returns `None` if nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a listing page request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchStatus {
    /// HTTP 200 and the body was read; fields reflect what the page contained.
    Fetched,
    /// The site answered with a non-200 status.
    Unavailable { status: u16 },
    /// Connection error, timeout, or unreadable body.
    Failed,
}

impl FetchStatus {
    #[must_use]
    pub fn is_fetched(self) -> bool {
        matches!(self, FetchStatus::Fetched)
    }
}

/// Fields read from an Amazon product detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmazonListing {
    pub identifier: Identifier,
    pub url: String,
    pub status: FetchStatus,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    /// Star rating as displayed, e.g. `"4.5"`.
    pub rating: Option<String>,
    pub review_count: Option<u64>,
    /// Best Sellers Rank in the top-level category.
    pub rank: Option<u64>,
}

impl AmazonListing {
    /// A listing carrying only the identifier and the URL that was requested.
    #[must_use]
    pub fn empty(identifier: Identifier, url: String, status: FetchStatus) -> Self {
        Self {
            identifier,
            url,
            status,
            product_name: None,
            price: None,
            rating: None,
            review_count: None,
            rank: None,
        }
    }
}

/// Fields read from the first hit on the wholesale site's search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WholesaleListing {
    pub identifier: Identifier,
    pub search_url: String,
    pub status: FetchStatus,
    /// Absolute link to the matched product page.
    pub product_url: Option<String>,
    pub product_name: Option<String>,
    pub price: Option<f64>,
}

impl WholesaleListing {
    #[must_use]
    pub fn empty(identifier: Identifier, search_url: String, status: FetchStatus) -> Self {
        Self {
            identifier,
            search_url,
            status,
            product_url: None,
            product_name: None,
            price: None,
        }
    }
}

/// Which source's product name wins when both pages carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePrecedence {
    /// The wholesale name overwrites the Amazon title.
    #[default]
    Wholesale,
    Amazon,
}

/// One output row's worth of data: both listings merged, plus the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    pub identifier: Identifier,
    pub product_name: Option<String>,
    pub amazon_url: String,
    pub amazon_status: FetchStatus,
    pub amazon_price: Option<f64>,
    pub amazon_rating: Option<String>,
    pub review_count: Option<u64>,
    pub amazon_rank: Option<u64>,
    /// Wholesale product link, or the search URL when no product matched.
    pub source_url: String,
    pub source_status: FetchStatus,
    pub source_price: Option<f64>,
    pub profitability: Option<Profitability>,
}

impl MergedRecord {
    /// Combines both listings for one identifier.
    ///
    /// Fields are disjoint except for the product name, which follows
    /// `precedence` and falls back to the other side when the preferred one
    /// is missing. The record is unscored until [`MergedRecord::score`].
    #[must_use]
    pub fn merge(
        amazon: AmazonListing,
        wholesale: WholesaleListing,
        precedence: NamePrecedence,
    ) -> Self {
        debug_assert_eq!(amazon.identifier, wholesale.identifier);

        let product_name = match precedence {
            NamePrecedence::Wholesale => wholesale.product_name.or(amazon.product_name),
            NamePrecedence::Amazon => amazon.product_name.or(wholesale.product_name),
        };

        Self {
            identifier: amazon.identifier,
            product_name,
            amazon_url: amazon.url,
            amazon_status: amazon.status,
            amazon_price: amazon.price,
            amazon_rating: amazon.rating,
            review_count: amazon.review_count,
            amazon_rank: amazon.rank,
            source_url: wholesale.product_url.unwrap_or(wholesale.search_url),
            source_status: wholesale.status,
            source_price: wholesale.price,
            profitability: None,
        }
    }

    /// Attaches the profitability score computed from the merged prices.
    #[must_use]
    pub fn score(mut self, config: &ProfitConfig) -> Self {
        self.profitability = calculate_profitability(self.amazon_price, self.source_price, config);
        self
    }
}
