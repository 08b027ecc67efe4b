use super::*;

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["arbscout", "run"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run {
            input: None,
            output: None,
            concurrency: None,
        }
    ));
}

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "arbscout",
        "run",
        "--input",
        "in.csv",
        "--output",
        "out/result.csv",
        "--concurrency",
        "4",
    ])
    .unwrap();

    let Commands::Run {
        input,
        output,
        concurrency,
    } = cli.command
    else {
        panic!("expected run command");
    };
    assert_eq!(input, Some(PathBuf::from("in.csv")));
    assert_eq!(output, Some(PathBuf::from("out/result.csv")));
    assert_eq!(concurrency, Some(4));
}

#[test]
fn run_rejects_non_numeric_concurrency() {
    assert!(Cli::try_parse_from(["arbscout", "run", "--concurrency", "many"]).is_err());
}

#[test]
fn parses_score_with_both_prices() {
    let cli = Cli::try_parse_from([
        "arbscout",
        "score",
        "--amazon-price",
        "20",
        "--source-price",
        "5.5",
    ])
    .unwrap();

    let Commands::Score {
        amazon_price,
        source_price,
    } = cli.command
    else {
        panic!("expected score command");
    };
    assert_eq!(amazon_price, Some(20.0));
    assert_eq!(source_price, Some(5.5));
}

#[test]
fn parses_extract_with_default_identifier() {
    let cli = Cli::try_parse_from([
        "arbscout", "extract", "--site", "wholesale", "--file", "page.html",
    ])
    .unwrap();

    let Commands::Extract {
        site,
        file,
        identifier,
    } = cli.command
    else {
        panic!("expected extract command");
    };
    assert_eq!(site, Site::Wholesale);
    assert_eq!(file, PathBuf::from("page.html"));
    assert_eq!(identifier, "UNKNOWN");
}

#[test]
fn extract_rejects_unknown_site() {
    assert!(
        Cli::try_parse_from(["arbscout", "extract", "--site", "ebay", "--file", "p.html"])
            .is_err()
    );
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["arbscout"]).is_err());
}

mod reports {
    use std::io::Write;

    use arbscout_core::{AppConfig, NamePrecedence, ProfitConfig};

    use crate::commands::{extract_report, score_report};
    use crate::Site;

    fn config() -> AppConfig {
        AppConfig {
            log_level: "info".to_owned(),
            input_path: "asins.csv".into(),
            output_path: "arbitrage.csv".into(),
            amazon_base_url: "https://www.amazon.com.be".to_owned(),
            wholesale_base_url: "https://www.eurolots.com/en".to_owned(),
            scraper_request_timeout_secs: 10,
            scraper_user_agent: "arbscout-test/0.1".to_owned(),
            scraper_accept_language: "en-US,en;q=0.9".to_owned(),
            scraper_max_concurrent: 1,
            scraper_inter_request_delay_ms: 0,
            name_precedence: NamePrecedence::Wholesale,
            profit: ProfitConfig::default(),
        }
    }

    fn json(report: &str) -> serde_json::Value {
        serde_json::from_str(report).expect("report is valid JSON")
    }

    #[test]
    fn score_report_serializes_profitability() {
        let value = json(&score_report(Some(20.0), Some(5.0), &ProfitConfig::default()).unwrap());
        assert_eq!(value["total_cost"], 8.5);
        assert_eq!(value["net_profit"], 7.95);
        assert_eq!(value["recommendation"], "Good Buy");
    }

    #[test]
    fn unscorable_pair_reports_nulls() {
        let value = json(&score_report(Some(20.0), None, &ProfitConfig::default()).unwrap());
        for key in ["total_cost", "fees", "net_profit", "margin", "roi", "recommendation"] {
            assert!(value[key].is_null(), "{key} should be null");
        }
    }

    #[test]
    fn extract_report_reads_saved_amazon_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<span id="productTitle"> Wooden Blocks </span>
               <div class="a-price"><span class="a-offscreen">€24,99</span></div>"#
        )
        .unwrap();

        let value = json(&extract_report(&config(), Site::Amazon, file.path(), "B0A").unwrap());
        assert_eq!(value["identifier"], "B0A");
        assert_eq!(value["url"], "https://www.amazon.com.be/dp/B0A");
        assert_eq!(value["product_name"], "Wooden Blocks");
        assert_eq!(value["price"], 24.99);
        assert_eq!(value["status"]["kind"], "fetched");
    }

    #[test]
    fn extract_report_reads_saved_wholesale_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<article class="product-miniature">
                 <h3 class="product-title"><a href="/en/lot-7.html">Lot 7</a></h3>
                 <span class="price">3,10 €</span>
               </article>"#
        )
        .unwrap();

        let value =
            json(&extract_report(&config(), Site::Wholesale, file.path(), "B0A").unwrap());
        assert_eq!(value["search_url"], "https://www.eurolots.com/en/search?s=B0A");
        assert_eq!(value["product_url"], "https://www.eurolots.com/en/lot-7.html");
        assert_eq!(value["price"], 3.1);
    }

    #[test]
    fn extract_report_fails_on_missing_file() {
        let err = extract_report(
            &config(),
            Site::Amazon,
            std::path::Path::new("/nonexistent/page.html"),
            "B0A",
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read HTML file"));
    }
}
