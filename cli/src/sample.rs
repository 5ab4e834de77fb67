//! The `sample` subcommand: fetch random products and dump the raw API data.

use std::path::Path;

use anyhow::{Context, Result};
use larder_core::{export, Product, SearchConfig, SearchSource, WebClient};
use rand::Rng;

const OUTPUT_FILE: &str = "random_products.json";

/// Random pages in this range give decent variety without walking off the
/// end of the index.
const MAX_RANDOM_PAGE: u32 = 1_000;

pub async fn run(count: usize, save: bool) -> Result<()> {
    let client = WebClient::new().context("Failed to build HTTP client")?;
    let source = SearchSource::new(SearchConfig {
        page_size: 20,
        ..SearchConfig::default()
    });

    let mut products: Vec<Product> = Vec::with_capacity(count);
    let max_attempts = count * 3;

    for attempt in 1..=max_attempts {
        if products.len() >= count {
            break;
        }

        let page = rand::thread_rng().gen_range(1..=MAX_RANDOM_PAGE);
        tracing::info!(page, attempt, max_attempts, "fetching random page");

        match source.fetch_page(&client, page).await {
            Ok(page_products) => {
                for product in page_products {
                    if products.len() >= count {
                        break;
                    }
                    if product.has_english_content() {
                        tracing::info!(name = product.display_name(), "added product");
                        products.push(product);
                    }
                }
            }
            Err(error) => {
                tracing::warn!(page, error = %error, "fetch failed, trying another page");
            }
        }
    }

    if products.is_empty() {
        anyhow::bail!("No products were fetched");
    }

    for product in &products {
        let detail = serde_json::to_string_pretty(product)?;
        tracing::debug!(product = %detail, "product detail");
    }

    if save {
        export::write_json(Path::new(OUTPUT_FILE), &products)
            .with_context(|| format!("Failed to write {OUTPUT_FILE}"))?;
        println!("Saved {} products to {}", products.len(), OUTPUT_FILE);
    }

    let with_ingredients = products
        .iter()
        .filter(|p| p.english_ingredients().is_some())
        .count();
    println!(
        "Fetched {} of {} requested products ({} with English ingredients)",
        products.len(),
        count,
        with_ingredients
    );
    Ok(())
}
