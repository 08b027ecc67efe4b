//! Batch run: identifiers in, one scored row per identifier out.

use std::path::Path;

use arbscout_core::{AppConfig, Identifier, MergedRecord};
use arbscout_scraper::{ListingClient, ListingClientConfig};
use futures::stream::{self, StreamExt};

use crate::csv_io;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub rows: usize,
    pub scored: usize,
    pub amazon_failures: usize,
    pub source_failures: usize,
}

impl BatchSummary {
    fn from_records(records: &[MergedRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.rows += 1;
            if record.profitability.is_some() {
                acc.scored += 1;
            }
            if !record.amazon_status.is_fetched() {
                acc.amazon_failures += 1;
            }
            if !record.source_status.is_fetched() {
                acc.source_failures += 1;
            }
            acc
        })
    }
}

/// Reads identifiers from `input`, fetches and scores each one, and writes
/// the table to `output`.
///
/// Source failures never abort the run; they only leave cells empty. The
/// output file is written once, after every identifier has been processed.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the output directory does
/// not exist, the HTTP client cannot be built, or the output cannot be written.
pub(crate) async fn run_batch(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    concurrency: usize,
) -> anyhow::Result<BatchSummary> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            anyhow::bail!("output directory {} does not exist", parent.display());
        }
    }

    let identifiers = csv_io::read_identifiers(input)?;
    tracing::info!(
        input = %input.display(),
        identifiers = identifiers.len(),
        concurrency,
        "starting batch run"
    );

    let client = ListingClient::new(&ListingClientConfig::from_app_config(config))?;
    let records = collect_records(&client, config, &identifiers, concurrency).await;

    csv_io::write_records(output, &records)?;

    let summary = BatchSummary::from_records(&records);
    tracing::info!(
        output = %output.display(),
        rows = summary.rows,
        scored = summary.scored,
        amazon_failures = summary.amazon_failures,
        source_failures = summary.source_failures,
        "batch run complete"
    );
    if summary.rows > 0 && summary.amazon_failures == summary.rows {
        tracing::warn!("no amazon listing could be fetched; check connectivity and base URL");
    }

    Ok(summary)
}

/// Processes `identifiers` with at most `concurrency` in flight. Records come
/// back in input order regardless of completion order.
pub(crate) async fn collect_records(
    client: &ListingClient,
    config: &AppConfig,
    identifiers: &[Identifier],
    concurrency: usize,
) -> Vec<MergedRecord> {
    stream::iter(identifiers)
        .map(|identifier| process_identifier(client, config, identifier))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Fetches both sources for one identifier, Amazon first, then merges and scores.
async fn process_identifier(
    client: &ListingClient,
    config: &AppConfig,
    identifier: &Identifier,
) -> MergedRecord {
    let amazon = client.fetch_amazon(identifier).await;
    let wholesale = client.fetch_wholesale(identifier).await;

    let record = MergedRecord::merge(amazon, wholesale, config.name_precedence)
        .score(&config.profit);
    tracing::debug!(
        identifier = %record.identifier,
        scored = record.profitability.is_some(),
        "identifier processed"
    );
    record
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
