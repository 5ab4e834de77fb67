//! Paginated harvest from the OpenFoodFacts search API.
//!
//! Pages are fetched sequentially; each product's English ingredient text is
//! tokenized into the caller's aggregate. A failed page is logged and
//! skipped, the loop advances. The run ends when a configured limit is hit
//! or the API returns a run of empty pages.

use std::time::Duration;

use url::Url;

use crate::aggregate::Aggregate;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::tokenize::{looks_english, tokenize};
use crate::types::{Product, RawRecord, SearchPage};

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

/// Fields we ask the API to return. Keeping this narrow keeps pages small.
const REQUESTED_FIELDS: &str =
    "code,product_name,product_name_en,ingredients_text,ingredients_text_en";

/// Limits and knobs for a paginated harvest.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub search_terms: String,
    pub page_size: u32,
    /// Hard cap on pages fetched.
    pub max_pages: Option<u32>,
    /// Stop after seeing this many products.
    pub max_products: Option<u64>,
    /// Stop once the aggregate holds this many distinct tokens.
    pub target_tokens: Option<usize>,
    /// Consecutive empty or failed pages before we assume the API has run dry.
    pub max_empty_pages: u32,
    /// Extra delay after a failed page, on top of normal request pacing.
    pub error_backoff: Duration,
    /// Drop single-word tokens that fail the `looks_english` heuristic.
    /// Phrases are never gated on it.
    pub english_only: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_terms: String::new(),
            page_size: 100,
            max_pages: None,
            max_products: None,
            target_tokens: None,
            max_empty_pages: 5,
            error_backoff: Duration::from_secs(1),
            english_only: true,
        }
    }
}

/// Outcome counters for a harvest pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct HarvestStats {
    pub pages_fetched: u64,
    pub failed_pages: u64,
    pub products_seen: u64,
    pub products_with_ingredients: u64,
}

/// The paginated search data source.
pub struct SearchSource {
    config: SearchConfig,
}

impl SearchSource {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The request URL for one page.
    pub fn page_url(&self, page: u32) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("search_terms", self.config.search_terms.clone()),
                ("page", page.to_string()),
                ("page_size", self.config.page_size.to_string()),
                ("json", "1".to_string()),
                ("fields", REQUESTED_FIELDS.to_string()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    /// Fetch and decode one page of products.
    pub async fn fetch_page(
        &self,
        client: &dyn HttpClient,
        page: u32,
    ) -> Result<Vec<Product>, FetchError> {
        let url = self.page_url(page)?;
        let body = client.get(url.as_str()).await?;
        let parsed: SearchPage =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(parsed.products)
    }

    /// Run the paginated harvest, feeding tokens into `aggregate` until a
    /// limit is reached or the API runs dry.
    pub async fn harvest(
        &self,
        client: &dyn HttpClient,
        aggregate: &mut dyn Aggregate,
    ) -> HarvestStats {
        let mut stats = HarvestStats::default();
        let mut page = 1u32;
        let mut empty_run = 0u32;

        loop {
            if let Some(max) = self.config.max_pages {
                if page > max {
                    tracing::info!(max_pages = max, "reached page limit");
                    break;
                }
            }
            if let Some(max) = self.config.max_products {
                if stats.products_seen >= max {
                    tracing::info!(max_products = max, "reached product limit");
                    break;
                }
            }
            if let Some(target) = self.config.target_tokens {
                if aggregate.len() >= target {
                    tracing::info!(target_tokens = target, "reached target token count");
                    break;
                }
            }

            match self.fetch_page(client, page).await {
                Ok(products) if products.is_empty() => {
                    stats.pages_fetched += 1;
                    empty_run += 1;
                    if empty_run >= self.config.max_empty_pages {
                        tracing::info!(empty_run, "empty page run, assuming API is exhausted");
                        break;
                    }
                }
                Ok(products) => {
                    stats.pages_fetched += 1;
                    empty_run = 0;

                    for product in products {
                        stats.products_seen += 1;
                        if let Some(record) = product.into_record() {
                            stats.products_with_ingredients += 1;
                            self.ingest(&record, aggregate);
                        }

                        if let Some(max) = self.config.max_products {
                            if stats.products_seen >= max {
                                break;
                            }
                        }
                        if let Some(target) = self.config.target_tokens {
                            if aggregate.len() >= target {
                                break;
                            }
                        }
                    }

                    if page % 10 == 0 {
                        tracing::info!(
                            page,
                            products = stats.products_seen,
                            tokens = aggregate.len(),
                            "harvest progress"
                        );
                    }
                }
                Err(error) => {
                    stats.failed_pages += 1;
                    // A failed page yields no products, so it counts toward
                    // the empty run; a persistent outage must terminate.
                    empty_run += 1;
                    tracing::warn!(page, error = %error, "skipping failed page");
                    if empty_run >= self.config.max_empty_pages {
                        tracing::warn!(empty_run, "consecutive failed pages, giving up");
                        break;
                    }
                    tokio::time::sleep(self.config.error_backoff).await;
                }
            }

            page += 1;
        }

        stats
    }

    /// Tokenize one record into the aggregate.
    fn ingest(&self, record: &RawRecord, aggregate: &mut dyn Aggregate) {
        tracing::trace!(source = %record.source, "tokenizing");
        for token in tokenize(&record.text) {
            if self.config.english_only
                && !token.as_str().contains(' ')
                && !looks_english(token.as_str())
            {
                continue;
            }
            aggregate.insert(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_carries_parameters() {
        let source = SearchSource::new(SearchConfig {
            search_terms: "oats".to_string(),
            page_size: 20,
            ..SearchConfig::default()
        });

        let url = source.page_url(3).unwrap();
        assert_eq!(url.host_str(), Some("world.openfoodfacts.org"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("search_terms".into(), "oats".into())));
        assert!(query.contains(&("page".into(), "3".into())));
        assert!(query.contains(&("page_size".into(), "20".into())));
        assert!(query.contains(&("json".into(), "1".into())));
        assert!(query.contains(&("fields".into(), REQUESTED_FIELDS.into())));
    }
}
