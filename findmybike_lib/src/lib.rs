//! Library layer for Find-My-Bike: query and pagination state, correction
//! drafts, and input validation on top of the `findmybike_api` client.
//!
//! State is owned by explicit controllers ([`FeedController`],
//! [`CorrectionForm`]) that front-ends borrow, rather than shared globally.

pub mod correction;
pub mod error;
pub mod feed;
pub mod selection;
pub mod source;
pub mod validation;

pub use findmybike_api;
pub use findmybike_api::types;
pub use findmybike_api::{Client, PostingQuery, Query};

pub use correction::{CorrectionForm, CorrectionStatus};
pub use error::FindMyBikeError;
pub use feed::{
    AspectMatch, FeedController, FeedState, FeedUpdate, FetchKind, FetchTicket, PostingFeed,
    DEFAULT_PAGE_SIZE,
};
pub use selection::{AspectSelection, CorrectionDraft, QueryState};
pub use source::PostingSource;
