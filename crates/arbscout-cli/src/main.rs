mod batch;
mod commands;
mod csv_io;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arbscout")]
#[command(about = "Amazon vs. wholesale arbitrage scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape both sources for every identifier in the input file and write the scored CSV
    Run {
        /// Input CSV with an `identifier` (or `asin`) column [default: ARBSCOUT_INPUT_PATH]
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output CSV, overwritten on success [default: ARBSCOUT_OUTPUT_PATH]
        #[arg(long)]
        output: Option<PathBuf>,

        /// Identifiers processed at once [default: ARBSCOUT_SCRAPER_MAX_CONCURRENT]
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Score one price pair with the configured costs and print the result as JSON
    Score {
        #[arg(long)]
        amazon_price: Option<f64>,

        #[arg(long)]
        source_price: Option<f64>,
    },
    /// Run the field extractor on a saved HTML page and print the listing as JSON
    Extract {
        #[arg(long, value_enum)]
        site: Site,

        #[arg(long)]
        file: PathBuf,

        /// Identifier the page belongs to; only used to fill in the listing URL
        #[arg(long, default_value = "UNKNOWN")]
        identifier: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Site {
    Amazon,
    Wholesale,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = arbscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            input,
            output,
            concurrency,
        } => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            let concurrency = concurrency.unwrap_or(config.scraper_max_concurrent);
            batch::run_batch(&config, &input, &output, concurrency).await?;
        }
        Commands::Score {
            amazon_price,
            source_price,
        } => {
            println!(
                "{}",
                commands::score_report(amazon_price, source_price, &config.profit)?
            );
        }
        Commands::Extract {
            site,
            file,
            identifier,
        } => {
            println!("{}", commands::extract_report(&config, site, &file, &identifier)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
