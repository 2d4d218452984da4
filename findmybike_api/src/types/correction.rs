//! Outbound correction payload for the `/correction` endpoint.

use serde::{Deserialize, Serialize};

use super::{PostingId, Prediction};

/// A user-submitted replacement for a posting's prediction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Correction {
    /// Posting the correction applies to.
    pub posting_id: PostingId,
    /// Corrected aspects.
    pub correction: Prediction,
}

impl Correction {
    pub fn new(posting_id: PostingId, correction: Prediction) -> Self {
        Self {
            posting_id,
            correction,
        }
    }
}
