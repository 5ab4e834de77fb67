//! Record types shared across the harvest pipeline.

use serde::{Deserialize, Serialize};

/// A single unit of raw ingredient text pulled from a data source, tagged
/// with where it came from. Ephemeral: created per fetched item and
/// discarded once tokenized.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Product code or name, for diagnostics only.
    pub source: String,
    /// The free-text ingredient list.
    pub text: String,
}

impl RawRecord {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// The subset of OpenFoodFacts product fields we request from the search API.
/// Everything is optional; the API omits fields freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text_en: Option<String>,
}

impl Product {
    /// English ingredient text, if the product has any.
    pub fn english_ingredients(&self) -> Option<&str> {
        self.ingredients_text_en
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.product_name_en
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.product_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown Product")
    }

    /// Whether the product carries any English content worth sampling.
    ///
    /// An English name or English ingredient text is taken at face value; a
    /// purely alphabetic plain name counts as weak evidence.
    pub fn has_english_content(&self) -> bool {
        if self
            .product_name_en
            .as_deref()
            .is_some_and(|name| !name.is_empty())
            || self.english_ingredients().is_some()
        {
            return true;
        }

        self.product_name.as_deref().is_some_and(|name| {
            !name.trim().is_empty() && name.chars().all(|c| c.is_alphabetic() || c == ' ')
        })
    }

    /// Convert to a record for ingestion, if there is English ingredient text.
    pub fn into_record(self) -> Option<RawRecord> {
        let text = self
            .ingredients_text_en
            .filter(|text| !text.trim().is_empty())?;
        let source = self
            .code
            .or(self.product_name)
            .unwrap_or_else(|| "unknown".to_string());
        Some(RawRecord { source, text })
    }
}

/// One page of the search API response.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub products: Vec<Product>,
}
