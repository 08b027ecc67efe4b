//! Input identifier list and output arbitrage table.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use arbscout_core::{Identifier, MergedRecord};
use serde::Serialize;

/// Header names accepted for the identifier column, matched case-insensitively.
const IDENTIFIER_HEADERS: [&str; 2] = ["identifier", "asin"];

/// Output column order. Written explicitly so an empty run still yields a header.
pub(crate) const OUTPUT_COLUMNS: [&str; 14] = [
    "identifier",
    "review_count",
    "product_name",
    "source_price",
    "amazon_price",
    "total_cost",
    "fees",
    "net_profit",
    "margin",
    "roi",
    "amazon_rank",
    "recommendation",
    "source_url",
    "amazon_url",
];

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    identifier: &'a str,
    review_count: Option<u64>,
    product_name: Option<&'a str>,
    source_price: Option<f64>,
    amazon_price: Option<f64>,
    total_cost: Option<f64>,
    fees: Option<f64>,
    net_profit: Option<f64>,
    margin: Option<f64>,
    roi: Option<f64>,
    amazon_rank: Option<u64>,
    recommendation: Option<&'static str>,
    source_url: &'a str,
    amazon_url: &'a str,
}

impl<'a> From<&'a MergedRecord> for OutputRow<'a> {
    fn from(record: &'a MergedRecord) -> Self {
        let profit = record.profitability.as_ref();
        Self {
            identifier: record.identifier.as_str(),
            review_count: record.review_count,
            product_name: record.product_name.as_deref(),
            source_price: record.source_price,
            amazon_price: record.amazon_price,
            total_cost: profit.map(|p| p.total_cost),
            fees: profit.map(|p| p.fees),
            net_profit: profit.map(|p| p.net_profit),
            margin: profit.map(|p| p.margin),
            roi: profit.map(|p| p.roi),
            amazon_rank: record.amazon_rank,
            recommendation: profit.map(|p| p.recommendation.label()),
            source_url: &record.source_url,
            amazon_url: &record.amazon_url,
        }
    }
}

/// Reads the identifier list from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, has no identifier column,
/// or contains a malformed record.
pub(crate) fn read_identifiers(path: &Path) -> anyhow::Result<Vec<Identifier>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;
    read_identifiers_from(file)
        .with_context(|| format!("failed to read identifiers from {}", path.display()))
}

/// Reads identifiers from any CSV source. Blank cells are skipped with a
/// warning; surrounding whitespace is trimmed.
pub(crate) fn read_identifiers_from<R: Read>(reader: R) -> anyhow::Result<Vec<Identifier>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| {
            IDENTIFIER_HEADERS
                .iter()
                .any(|name| h.eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| {
            anyhow::anyhow!(
                "input has no identifier column (expected one of: {})",
                IDENTIFIER_HEADERS.join(", ")
            )
        })?;

    let mut identifiers = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        match record.get(column).and_then(Identifier::parse) {
            Some(identifier) => identifiers.push(identifier),
            None => {
                // +2: one for the header, one for 1-based numbering.
                tracing::warn!(line = index + 2, "skipping row with blank identifier");
            }
        }
    }

    Ok(identifiers)
}

/// Writes `records` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to write.
pub(crate) fn write_records(path: &Path, records: &[MergedRecord]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    write_records_to(file, records)
        .with_context(|| format!("failed to write output file {}", path.display()))
}

pub(crate) fn write_records_to<W: Write>(
    writer: W,
    records: &[MergedRecord],
) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(OutputRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}
