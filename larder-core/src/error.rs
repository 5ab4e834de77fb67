use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Transport failure not backed by a `reqwest::Error`, e.g. a simulated
    /// one from the mock client.
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
