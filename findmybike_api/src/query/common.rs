//! Shared query infrastructure: the [`Query`] trait and [`Pagination`] fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for offset pagination.
pub trait Query {
    /// Returns the `(name, value)` pairs this query contributes, in wire order.
    /// Empty filters are never included.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Returns a mutable reference to the pagination fields.
    fn get_pagination(&mut self) -> &mut Pagination;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    ///
    /// A query without parameters leaves the URL untouched (no trailing `?`).
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// Serializes the parameters as an `application/x-www-form-urlencoded` string.
    fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs().iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Sets the number of results to skip.
    fn with_skip(mut self, skip: u64) -> Self
    where
        Self: Sized,
    {
        self.get_pagination().skip = Some(skip);
        self
    }

    /// Sets the maximum number of results to return.
    fn with_limit(mut self, limit: u64) -> Self
    where
        Self: Sized,
    {
        self.get_pagination().limit = Some(limit);
        self
    }
}

/// Offset pagination shared by list endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip. `None` or zero is omitted from the URL.
    pub skip: Option<u64>,
    /// Maximum number of results. `None` or zero uses the server default.
    pub limit: Option<u64>,
}

impl Pagination {
    /// Returns the pagination pairs, omitting unset and zero values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip.filter(|s| *s > 0) {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Clears both fields.
    pub fn reset(&mut self) {
        *self = Pagination::default();
    }
}
