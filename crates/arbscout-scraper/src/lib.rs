pub mod client;
pub mod error;
pub mod extract;
pub mod parse;
mod rate_limit;

pub use client::{amazon_url, wholesale_search_url, ListingClient, ListingClientConfig};
pub use error::ScraperError;
pub use extract::{parse_amazon_page, parse_wholesale_page};
