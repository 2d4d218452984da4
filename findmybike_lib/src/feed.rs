//! Query/pagination state machine for the posting list.
//!
//! Every fetch is split into a *begin* step that hands out a [`FetchTicket`]
//! and a *complete* step that applies the response. A ticket remembers the
//! generation (search) it was issued for; starting a new search bumps the
//! generation, so responses to superseded requests are discarded instead of
//! being appended to the new list.
//!
//! ```text
//! Idle --begin_search--> Searching --complete--> Idle (list replaced)
//! Idle --begin_load_more--> LoadingMore --complete--> Idle (list appended)
//! ```

use std::collections::HashSet;

use serde::Serialize;

use findmybike_api::types::{Posting, PostingId, Prediction};
use findmybike_api::{PostingQuery, Query};

use crate::error::FindMyBikeError;
use crate::source::PostingSource;

/// Page size used when none is configured. Matches the service default.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// No fetch in flight.
    Idle,
    /// A fresh search is in flight; the list will be replaced.
    Searching,
    /// A next page is in flight; the list will be appended to.
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Search,
    LoadMore,
}

/// A request issued by the feed. Pass it back to [`PostingFeed::complete`]
/// together with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    kind: FetchKind,
    query: PostingQuery,
}

impl FetchTicket {
    /// Query to send, including pagination.
    pub fn query(&self) -> &PostingQuery {
        &self.query
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of applying a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    /// A search completed and replaced the list. `follow_up` is a load-more
    /// that was requested while the search was in flight, now issued against
    /// the new list.
    Replaced {
        count: usize,
        follow_up: Option<FetchTicket>,
    },
    /// A page was appended. `count` excludes postings already in the list.
    Appended { count: usize },
    /// The response belonged to a superseded request and was dropped.
    Stale,
}

/// Which aspects of a prediction match the active filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AspectMatch {
    pub bike: bool,
    pub frame: bool,
    pub color: bool,
}

impl AspectMatch {
    /// Compares a prediction against a filter. Unfiltered aspects never match.
    pub fn between(filter: &PostingQuery, prediction: &Prediction) -> Self {
        Self {
            bike: filter.bike == Some(prediction.bike),
            frame: filter.frame == Some(prediction.frame),
            color: filter.color == Some(prediction.color),
        }
    }
}

/// Accumulated postings for the active search plus pagination bookkeeping.
#[derive(Debug)]
pub struct PostingFeed {
    postings: Vec<Posting>,
    seen: HashSet<PostingId>,
    /// Filter of the search that produced `postings`. Replaced only when a
    /// new search succeeds.
    active: Option<PostingQuery>,
    generation: u64,
    state: FeedState,
    page_size: u64,
    /// Number of postings the server has returned for the active search.
    /// Used as `skip`; equals `postings.len()` unless duplicates were dropped.
    offset: u64,
    exhausted: bool,
    load_more_queued: bool,
    last_error: Option<String>,
}

impl Default for PostingFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PostingFeed {
    pub fn new(page_size: u64) -> Self {
        Self {
            postings: Vec::new(),
            seen: HashSet::new(),
            active: None,
            generation: 0,
            state: FeedState::Idle,
            page_size: page_size.max(1),
            offset: 0,
            exhausted: false,
            load_more_queued: false,
            last_error: None,
        }
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Filter of the search the list belongs to, if one has succeeded.
    pub fn active_query(&self) -> Option<&PostingQuery> {
        self.active.as_ref()
    }

    /// True once a page shorter than the page size came back. Further
    /// load-mores are no-ops until the next search.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True while more pages may be available and nothing is in flight.
    pub fn can_load_more(&self) -> bool {
        self.state == FeedState::Idle && self.active.is_some() && !self.exhausted
    }

    /// Message of the last failed request, cleared by the next search.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Which aspects of `prediction` match the active search filter.
    pub fn aspect_matches(&self, prediction: &Prediction) -> AspectMatch {
        match &self.active {
            Some(filter) => AspectMatch::between(filter, prediction),
            None => AspectMatch::default(),
        }
    }

    /// Issues the first page for `query`. Any request still in flight
    /// becomes stale. The current list, its filter and its paging position
    /// stay in place until the search succeeds.
    pub fn begin_search(&mut self, query: &PostingQuery) -> FetchTicket {
        let filter = query.without_pagination();
        self.generation += 1;
        self.state = FeedState::Searching;
        self.load_more_queued = false;
        self.last_error = None;
        tracing::debug!("search #{} started: {}", self.generation, filter.to_query_string());
        FetchTicket {
            generation: self.generation,
            kind: FetchKind::Search,
            query: filter.with_limit(self.page_size),
        }
    }

    /// Issues the next page. Returns `None` when a page is already in
    /// flight, the feed is exhausted, or no search has been submitted. While
    /// a search is in flight the request is queued and handed out by
    /// [`complete`](Self::complete) once the search lands.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        match self.state {
            FeedState::Searching => {
                self.load_more_queued = true;
                None
            }
            FeedState::LoadingMore => None,
            FeedState::Idle => {
                let filter = self.active.as_ref()?;
                if self.exhausted {
                    return None;
                }
                let query = filter
                    .clone()
                    .with_skip(self.offset)
                    .with_limit(self.page_size);
                self.state = FeedState::LoadingMore;
                Some(FetchTicket {
                    generation: self.generation,
                    kind: FetchKind::LoadMore,
                    query,
                })
            }
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        let expected = match ticket.kind {
            FetchKind::Search => FeedState::Searching,
            FetchKind::LoadMore => FeedState::LoadingMore,
        };
        ticket.generation == self.generation && self.state == expected
    }

    /// Applies the response to `ticket`.
    ///
    /// Stale responses, successful or not, are dropped. A failed request
    /// leaves the list untouched, returns the feed to `Idle`, and is
    /// reported back to the caller.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Posting>, FindMyBikeError>,
    ) -> Result<FeedUpdate, FindMyBikeError> {
        if !self.is_current(ticket) {
            tracing::debug!(
                "dropping stale {:?} response for search #{} (current #{})",
                ticket.kind,
                ticket.generation,
                self.generation
            );
            return Ok(FeedUpdate::Stale);
        }

        self.state = FeedState::Idle;
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.load_more_queued = false;
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let limit = ticket.query.pagination.limit.unwrap_or(self.page_size);
        self.exhausted = (page.len() as u64) < limit;

        match ticket.kind {
            FetchKind::Search => {
                self.active = Some(ticket.query.without_pagination());
                self.offset = page.len() as u64;
                self.seen = page.iter().map(|p| p.id.clone()).collect();
                self.postings = page;
                let count = self.postings.len();

                let follow_up = if std::mem::take(&mut self.load_more_queued) {
                    self.begin_load_more()
                } else {
                    None
                };
                Ok(FeedUpdate::Replaced { count, follow_up })
            }
            FetchKind::LoadMore => {
                self.offset += page.len() as u64;
                let before = self.postings.len();
                for posting in page {
                    if self.seen.insert(posting.id.clone()) {
                        self.postings.push(posting);
                    }
                }
                let count = self.postings.len() - before;
                Ok(FeedUpdate::Appended { count })
            }
        }
    }
}

/// Owns a [`PostingFeed`] and the source it is filled from, and runs the
/// begin/complete cycle for front-ends.
pub struct FeedController<S> {
    source: S,
    feed: PostingFeed,
}

impl<S: PostingSource> FeedController<S> {
    pub fn new(source: S, page_size: u64) -> Self {
        Self {
            source,
            feed: PostingFeed::new(page_size),
        }
    }

    pub fn feed(&self) -> &PostingFeed {
        &self.feed
    }

    /// Runs a fresh search, replacing the list. Returns the number of
    /// postings now in the list. On failure the previous list and filter
    /// are kept.
    ///
    /// `search` holds the controller mutably until the search lands, so no
    /// load-more can be queued behind it and an `Err` always means the
    /// search itself failed.
    pub async fn search(&mut self, query: &PostingQuery) -> Result<usize, FindMyBikeError> {
        let ticket = self.feed.begin_search(query);
        self.run(ticket).await?;
        Ok(self.feed.len())
    }

    /// Loads the next page. Returns how many new postings were appended;
    /// zero when there was nothing to load.
    pub async fn load_more(&mut self) -> Result<usize, FindMyBikeError> {
        match self.feed.begin_load_more() {
            Some(ticket) => self.run(ticket).await,
            None => Ok(0),
        }
    }

    async fn run(&mut self, ticket: FetchTicket) -> Result<usize, FindMyBikeError> {
        let mut appended = 0;
        let mut next = Some(ticket);
        while let Some(ticket) = next.take() {
            let result = self.source.fetch_postings(ticket.query()).await;
            match self.feed.complete(&ticket, result)? {
                FeedUpdate::Replaced { follow_up, .. } => next = follow_up,
                FeedUpdate::Appended { count } => appended += count,
                FeedUpdate::Stale => {}
            }
        }
        Ok(appended)
    }
}
