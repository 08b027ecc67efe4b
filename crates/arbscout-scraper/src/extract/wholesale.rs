use std::sync::LazyLock;

use arbscout_core::{FetchStatus, Identifier, WholesaleListing};
use reqwest::Url;
use scraper::{Html, Selector};

use super::non_empty_text;
use crate::parse::parse_price;

static PRODUCT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-miniature").expect("valid product selector"));

static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-title a").expect("valid title link selector"));

static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".price, .product-price, .price-new").expect("valid price selector")
});

/// Extracts a [`WholesaleListing`] from the first product tile on a search
/// results page. A page without product tiles yields an empty listing.
#[must_use]
pub fn parse_wholesale_page(
    identifier: Identifier,
    search_url: String,
    html: &str,
) -> WholesaleListing {
    let document = Html::parse_document(html);
    let mut listing = WholesaleListing::empty(identifier, search_url, FetchStatus::Fetched);

    let Some(product) = document.select(&PRODUCT).next() else {
        return listing;
    };

    if let Some(link) = product.select(&TITLE_LINK).next() {
        listing.product_name = non_empty_text(link);
        listing.product_url = link
            .value()
            .attr("href")
            .map(|href| resolve_href(&listing.search_url, href));
    }

    listing.price = product
        .select(&PRICE)
        .next()
        .and_then(|element| parse_price(&element.text().collect::<String>()));

    listing
}

/// Resolves a possibly relative `href` against the page it appeared on.
/// Falls back to the raw value when either side does not parse as a URL.
fn resolve_href(page_url: &str, href: &str) -> String {
    let href = href.trim();
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map_or_else(|_| href.to_owned(), String::from)
}
