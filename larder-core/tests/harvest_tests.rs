//! End-to-end harvest tests driven by the mock HTTP client.

use std::time::Duration;

use larder_core::{
    export, Aggregate, FrequencyAggregate, MockClient, SearchConfig, SearchSource,
    StopwordFilter, UniqueAggregate,
};

fn test_config() -> SearchConfig {
    SearchConfig {
        base_url: "https://food.example/search.pl".to_string(),
        page_size: 20,
        max_empty_pages: 2,
        error_backoff: Duration::ZERO,
        ..SearchConfig::default()
    }
}

fn page_body(ingredients: &[&str]) -> String {
    let products: Vec<String> = ingredients
        .iter()
        .map(|text| format!(r#"{{"product_name": "P", "ingredients_text_en": "{text}"}}"#))
        .collect();
    format!(r#"{{"products": [{}]}}"#, products.join(","))
}

const EMPTY_PAGE: &str = r#"{"products": []}"#;

#[tokio::test]
async fn test_harvest_until_empty_page_run() {
    let source = SearchSource::new(test_config());
    let client = MockClient::new()
        .with_body(
            source.page_url(1).unwrap().as_str(),
            &page_body(&["water, flavor (citric acid)"]),
        )
        .with_body(source.page_url(2).unwrap().as_str(), &page_body(&["milk, sugar"]))
        .with_body(source.page_url(3).unwrap().as_str(), EMPTY_PAGE)
        .with_body(source.page_url(4).unwrap().as_str(), EMPTY_PAGE);

    let mut aggregate = UniqueAggregate::new();
    let stats = source.harvest(&client, &mut aggregate).await;

    assert_eq!(stats.pages_fetched, 4);
    assert_eq!(stats.failed_pages, 0);
    assert_eq!(stats.products_seen, 2);
    assert_eq!(stats.products_with_ingredients, 2);

    for word in ["water", "flavor", "citric acid", "citric", "acid", "milk", "sugar"] {
        assert!(aggregate.contains(word), "missing {word:?}");
    }
}

#[tokio::test]
async fn test_failed_and_malformed_pages_are_skipped() {
    let mut config = test_config();
    config.max_pages = Some(4);
    // Two consecutive failures must stay under the giving-up threshold here.
    config.max_empty_pages = 3;
    let source = SearchSource::new(config);

    // Page 1 errors, page 2 is not JSON, pages 3 and 4 are fine.
    let client = MockClient::new()
        .with_error(source.page_url(1).unwrap().as_str(), "connection reset")
        .with_body(source.page_url(2).unwrap().as_str(), "<html>rate limited</html>")
        .with_body(source.page_url(3).unwrap().as_str(), &page_body(&["water"]))
        .with_body(source.page_url(4).unwrap().as_str(), &page_body(&["salt"]));

    let mut aggregate = UniqueAggregate::new();
    let stats = source.harvest(&client, &mut aggregate).await;

    assert_eq!(stats.failed_pages, 2);
    assert_eq!(stats.pages_fetched, 2);
    assert!(aggregate.contains("water"));
    assert!(aggregate.contains("salt"));
}

#[tokio::test]
async fn test_persistent_failure_terminates() {
    // No responses registered at all: every page fails. The harvest must
    // give up after max_empty_pages consecutive failures instead of looping.
    let source = SearchSource::new(test_config());
    let client = MockClient::new();

    let mut aggregate = UniqueAggregate::new();
    let stats = tokio::time::timeout(
        Duration::from_millis(500),
        source.harvest(&client, &mut aggregate),
    )
    .await
    .expect("harvest must terminate when every page fails");

    assert_eq!(stats.failed_pages, 2);
    assert_eq!(stats.pages_fetched, 0);
    assert!(aggregate.is_empty());
}

#[tokio::test]
async fn test_target_token_count_stops_harvest() {
    let mut config = test_config();
    config.target_tokens = Some(2);
    let source = SearchSource::new(config);

    let client = MockClient::new()
        .with_body(
            source.page_url(1).unwrap().as_str(),
            &page_body(&["water, milk, sugar, salt"]),
        )
        // Never requested: the target is hit on page 1.
        .with_error(source.page_url(2).unwrap().as_str(), "should not be fetched");

    let mut aggregate = UniqueAggregate::new();
    let stats = source.harvest(&client, &mut aggregate).await;

    assert_eq!(stats.failed_pages, 0);
    assert!(aggregate.len() >= 2);
}

#[tokio::test]
async fn test_frequency_harvest_filter_and_export() {
    let mut config = test_config();
    config.max_pages = Some(1);
    let source = SearchSource::new(config);

    let client = MockClient::new().with_body(
        source.page_url(1).unwrap().as_str(),
        &page_body(&["milk, sugar", "milk and water"]),
    );

    let mut aggregate = FrequencyAggregate::new();
    source.harvest(&client, &mut aggregate).await;

    aggregate.apply_filter(&StopwordFilter::default());
    assert_eq!(aggregate.count("and"), 0);
    assert_eq!(aggregate.count("milk"), 2);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("freq.csv");
    export::write_csv(&csv_path, &aggregate.rows()).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("ingredient,frequency"));
    assert_eq!(lines.next(), Some("milk,2"));
}
