//! Error types for the library layer.

use thiserror::Error;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Error, Debug)]
pub enum FindMyBikeError {
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] findmybike_api::Error),
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FindMyBikeError {
    /// True for transport failures and non-success statuses, the errors a
    /// user can act on by trying again.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Api(findmybike_api::Error::Network(_))
                | Self::Api(findmybike_api::Error::HttpStatus { .. })
        )
    }
}
