//! Error types for the API client.

/// Errors that can occur when talking to the Find-My-Bike service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured base URL and path do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The request could not be sent or the response body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The service answered with a non-success status. `body` is truncated.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}
