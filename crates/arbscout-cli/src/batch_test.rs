use std::path::PathBuf;
use std::time::Duration;

use arbscout_core::{FetchStatus, NamePrecedence, ProfitConfig, Recommendation};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(base: &str) -> AppConfig {
    AppConfig {
        log_level: "info".to_owned(),
        input_path: PathBuf::from("asins.csv"),
        output_path: PathBuf::from("arbitrage.csv"),
        amazon_base_url: base.to_owned(),
        wholesale_base_url: format!("{base}/en"),
        scraper_request_timeout_secs: 2,
        scraper_user_agent: "arbscout-test/0.1".to_owned(),
        scraper_accept_language: "en-US,en;q=0.9".to_owned(),
        scraper_max_concurrent: 1,
        scraper_inter_request_delay_ms: 0,
        name_precedence: NamePrecedence::Wholesale,
        profit: ProfitConfig::default(),
    }
}

fn client_for(config: &AppConfig) -> ListingClient {
    ListingClient::new(&ListingClientConfig::from_app_config(config)).unwrap()
}

fn ids(raw: &[&str]) -> Vec<Identifier> {
    raw.iter().map(|r| Identifier::parse(r).unwrap()).collect()
}

fn amazon_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
             <span id="productTitle">{title}</span>
             <div class="a-price"><span class="a-offscreen">{price}</span></div>
             <span id="acrCustomerReviewText">42 ratings</span>
           </body></html>"#
    )
}

fn wholesale_page(name: &str, price: &str) -> String {
    format!(
        r#"<html><body>
             <article class="product-miniature">
               <h3 class="product-title"><a href="/en/lots/{name}.html">{name}</a></h3>
               <span class="price">{price}</span>
             </article>
           </body></html>"#
    )
}

async fn mount_amazon(server: &MockServer, id: &str, body: String, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/dp/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

async fn mount_wholesale(server: &MockServer, id: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/en/search"))
        .and(query_param("s", id))
        .respond_with(template)
        .mount(server)
        .await;
}

fn read_output(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        csv_io::OUTPUT_COLUMNS.to_vec()
    );
    reader.records().map(Result::unwrap).collect()
}

#[tokio::test]
async fn every_identifier_yields_a_row_even_when_a_source_fails() {
    let server = MockServer::start().await;
    mount_amazon(&server, "B0GOOD", amazon_page("Blocks", "€20,00"), 0).await;
    mount_wholesale(
        &server,
        "B0GOOD",
        ResponseTemplate::new(200).set_body_string(wholesale_page("blocks-lot", "5,00 €")),
    )
    .await;
    mount_amazon(&server, "B0GONE", amazon_page("Puzzle", "€15,00"), 0).await;
    mount_wholesale(&server, "B0GONE", ResponseTemplate::new(404)).await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("asins.csv");
    let output = dir.path().join("arbitrage.csv");
    std::fs::write(&input, "asin\nB0GOOD\n\nB0GONE\n").unwrap();

    let config = test_config(&server.uri());
    let summary = run_batch(&config, &input, &output, 2).await.unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            rows: 2,
            scored: 1,
            amazon_failures: 0,
            source_failures: 1,
        }
    );

    let rows = read_output(&output);
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][0], "B0GOOD");
    assert_eq!(&rows[0][2], "blocks-lot");
    assert_eq!(&rows[0][11], "Good Buy");
    assert_eq!(
        &rows[0][12],
        format!("{}/en/lots/blocks-lot.html", server.uri())
    );

    assert_eq!(&rows[1][0], "B0GONE");
    assert_eq!(&rows[1][2], "Puzzle", "falls back to the amazon title");
    assert_eq!(&rows[1][3], "", "no wholesale price");
    assert_eq!(&rows[1][11], "", "unscored row has no recommendation");
    assert_eq!(&rows[1][12], format!("{}/en/search?s=B0GONE", server.uri()));
    assert_eq!(&rows[1][13], format!("{}/dp/B0GONE", server.uri()));
}

#[tokio::test]
async fn records_keep_input_order_under_concurrency() {
    let server = MockServer::start().await;
    // The first identifier answers last.
    mount_amazon(&server, "B0SLOW", amazon_page("Slow", "€10,00"), 400).await;
    mount_amazon(&server, "B0MID", amazon_page("Mid", "€10,00"), 150).await;
    mount_amazon(&server, "B0FAST", amazon_page("Fast", "€10,00"), 0).await;
    for id in ["B0SLOW", "B0MID", "B0FAST"] {
        mount_wholesale(&server, id, ResponseTemplate::new(200).set_body_string("<html></html>"))
            .await;
    }

    let config = test_config(&server.uri());
    let client = client_for(&config);
    let records =
        collect_records(&client, &config, &ids(&["B0SLOW", "B0MID", "B0FAST"]), 3).await;

    let order: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(order, vec!["B0SLOW", "B0MID", "B0FAST"]);
    assert!(records.iter().all(|r| r.profitability.is_none()));
}

#[tokio::test]
async fn unreachable_sources_still_produce_rows_with_urls() {
    let config = test_config("http://127.0.0.1:1");
    let client = client_for(&config);

    let records = collect_records(&client, &config, &ids(&["B0A", "B0B"]), 2).await;

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.amazon_status, FetchStatus::Failed);
        assert_eq!(record.source_status, FetchStatus::Failed);
        assert!(record.amazon_url.ends_with(&format!("/dp/{}", record.identifier)));
        assert!(record
            .source_url
            .ends_with(&format!("/en/search?s={}", record.identifier)));
        assert!(record.product_name.is_none());
        assert!(record.profitability.is_none());
    }
}

#[tokio::test]
async fn amazon_name_precedence_is_honoured() {
    let server = MockServer::start().await;
    mount_amazon(&server, "B0A", amazon_page("Amazon Title", "€25,00"), 0).await;
    mount_wholesale(
        &server,
        "B0A",
        ResponseTemplate::new(200).set_body_string(wholesale_page("lot-title", "20,00 €")),
    )
    .await;

    let mut config = test_config(&server.uri());
    config.name_precedence = NamePrecedence::Amazon;
    let client = client_for(&config);

    let records = collect_records(&client, &config, &ids(&["B0A"]), 1).await;
    assert_eq!(records[0].product_name.as_deref(), Some("Amazon Title"));
    let profit = records[0].profitability.as_ref().unwrap();
    assert_eq!(profit.recommendation, Recommendation::LowProfit);
}

#[tokio::test]
async fn empty_input_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("asins.csv");
    let output = dir.path().join("arbitrage.csv");
    std::fs::write(&input, "identifier\n").unwrap();

    let config = test_config("http://127.0.0.1:1");
    let summary = run_batch(&config, &input, &output, 1).await.unwrap();

    assert_eq!(summary, BatchSummary::default());
    assert!(read_output(&output).is_empty());
}

#[tokio::test]
async fn missing_output_directory_fails_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("asins.csv");
    std::fs::write(&input, "identifier\nB0A\n").unwrap();
    let output = dir.path().join("missing").join("arbitrage.csv");

    let config = test_config("http://127.0.0.1:1");
    let err = run_batch(&config, &input, &output, 1).await.unwrap_err();
    assert!(
        err.to_string().contains("does not exist"),
        "unexpected error: {err}"
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn missing_identifier_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("asins.csv");
    let output = dir.path().join("arbitrage.csv");
    std::fs::write(&input, "sku\n123\n").unwrap();

    let config = test_config("http://127.0.0.1:1");
    let err = run_batch(&config, &input, &output, 1).await.unwrap_err();
    assert!(
        format!("{err:#}").contains("identifier column"),
        "unexpected error: {err:#}"
    );
    assert!(!output.exists(), "no output on input error");
}
