//! Field extraction from listing page markup.
//!
//! Each site module owns its CSS selectors and turns a raw HTML body into a
//! typed listing. Rules are independent and best-effort: a selector that
//! matches nothing leaves its field `None` and the remaining rules still run.
//! When a site changes its markup, update the selectors in its module and
//! add the captured page shape to that module's tests.

mod amazon;
mod wholesale;

pub use amazon::parse_amazon_page;
pub use wholesale::parse_wholesale_page;

use scraper::ElementRef;

/// Text content with every run of whitespace collapsed to one space.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like [`collapsed_text`], but `None` when the element has no visible text.
fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = collapsed_text(element);
    (!text.is_empty()).then_some(text)
}
