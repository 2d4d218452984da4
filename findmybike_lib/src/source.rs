//! The backend seam the controllers talk through.

use std::future::Future;

use findmybike_api::types::{Correction, Posting};
use findmybike_api::{Client, PostingQuery};

use crate::error::FindMyBikeError;

/// Something that can serve pages of postings and accept corrections.
///
/// Implemented by [`Client`]; tests substitute scripted fakes.
pub trait PostingSource {
    /// Fetches one page of postings for `query`.
    fn fetch_postings(
        &self,
        query: &PostingQuery,
    ) -> impl Future<Output = Result<Vec<Posting>, FindMyBikeError>>;

    /// Submits a correction.
    fn submit_correction(
        &self,
        correction: &Correction,
    ) -> impl Future<Output = Result<(), FindMyBikeError>>;
}

impl PostingSource for Client {
    async fn fetch_postings(&self, query: &PostingQuery) -> Result<Vec<Posting>, FindMyBikeError> {
        Ok(self.get_postings(query).await?.data)
    }

    async fn submit_correction(&self, correction: &Correction) -> Result<(), FindMyBikeError> {
        Ok(Client::submit_correction(self, correction).await?)
    }
}
