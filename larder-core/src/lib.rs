//! larder-core: harvest an ingredient vocabulary from OpenFoodFacts.
//!
//! Raw ingredient text flows from a data source (the paginated search API or
//! the bulk TSV dump) through the tokenizer into an aggregate; a stopword
//! filter prunes the aggregate before export to CSV/TXT/JSON.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod http;
pub mod search;
pub mod stopwords;
pub mod tokenize;
pub mod tsv;
pub mod types;

pub use aggregate::{Aggregate, ExportRow, FrequencyAggregate, UniqueAggregate};
pub use error::{ExportError, FetchError, SourceError};
pub use http::{HttpClient, MockClient, MockResponse, RateLimiter, WebClient, WebClientBuilder};
pub use search::{HarvestStats, SearchConfig, SearchSource, DEFAULT_BASE_URL};
pub use stopwords::StopwordFilter;
pub use tokenize::{looks_english, tokenize, Token, MIN_TOKEN_LEN};
pub use tsv::{harvest_file, TsvConfig, TsvStats};
pub use types::{Product, RawRecord, SearchPage};
