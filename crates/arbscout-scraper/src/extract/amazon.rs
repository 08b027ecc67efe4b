use std::sync::LazyLock;

use arbscout_core::{AmazonListing, FetchStatus, Identifier};
use scraper::{Html, Selector};

use super::{collapsed_text, non_empty_text};
use crate::parse::{first_token, parse_count, parse_price, parse_rank};

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#productTitle").expect("valid title selector"));

static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".a-price .a-offscreen").expect("valid price selector"));

static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span[data-asin] i span").expect("valid rating selector"));

static REVIEW_COUNT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#acrCustomerReviewText").expect("valid review count selector")
});

static SALES_RANK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#SalesRank").expect("valid sales rank selector"));

static DETAIL_BULLETS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#detailBulletsWrapper_feature_div li").expect("valid detail bullet selector")
});

static DETAIL_TABLE_ROWS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#productDetails_detailBullets_sections1 tr")
        .expect("valid detail table selector")
});

const RANK_MARKER: &str = "Best Sellers Rank";

/// Extracts an [`AmazonListing`] from a product detail page body.
///
/// The returned listing is always marked [`FetchStatus::Fetched`]; callers
/// that did not get a 200 response build an empty listing instead.
#[must_use]
pub fn parse_amazon_page(identifier: Identifier, url: String, html: &str) -> AmazonListing {
    let document = Html::parse_document(html);

    AmazonListing {
        product_name: extract_title(&document),
        price: extract_price(&document),
        rating: extract_rating(&document),
        review_count: extract_review_count(&document),
        rank: extract_rank(&document),
        ..AmazonListing::empty(identifier, url, FetchStatus::Fetched)
    }
}

fn extract_title(document: &Html) -> Option<String> {
    document.select(&TITLE).next().and_then(non_empty_text)
}

fn extract_price(document: &Html) -> Option<f64> {
    let element = document.select(&PRICE).next()?;
    parse_price(&element.text().collect::<String>())
}

fn extract_rating(document: &Html) -> Option<String> {
    let element = document.select(&RATING).next()?;
    first_token(&element.text().collect::<String>())
}

fn extract_review_count(document: &Html) -> Option<u64> {
    let element = document.select(&REVIEW_COUNT).next()?;
    parse_count(&element.text().collect::<String>())
}

/// Best Sellers Rank, looked up in three places in priority order: the
/// dedicated rank element, the detail bullet list, then the detail table.
/// The first location yielding text wins, even if no rank parses from it.
fn extract_rank(document: &Html) -> Option<u64> {
    let dedicated = document.select(&SALES_RANK).next().and_then(non_empty_text);

    let rank_text = dedicated
        .or_else(|| marked_text(document, &DETAIL_BULLETS))
        .or_else(|| marked_text(document, &DETAIL_TABLE_ROWS))?;

    parse_rank(&rank_text)
}

fn marked_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(collapsed_text)
        .find(|text| text.contains(RANK_MARKER))
}
