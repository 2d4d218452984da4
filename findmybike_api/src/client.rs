//! HTTP client for the Find-My-Bike API.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{PostingQuery, Query},
    types::{Correction, PostingList},
    Error,
};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "access_token";

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Find-My-Bike API.
///
/// Every request carries the `access_token` header. Non-success statuses are
/// reported as [`Error::HttpStatus`] with a truncated body; nothing is retried.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without trailing slash.
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a client for the given backend with the default 30-second timeout.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", self.base_api_url, path, e))
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Network(e)
            })?;

        let body = read_success_body(resp).await?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            Error::Parse(e)
        })
    }

    async fn post<B>(&self, path: &str, payload: &B) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.get_url(path, None::<&PostingQuery>)?;
        tracing::debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to post resource: {}", e);
                Error::Network(e)
            })?;

        read_success_body(resp).await?;
        Ok(())
    }

    /// Fetches one page of postings matching the given query.
    pub async fn get_postings(&self, query: &PostingQuery) -> Result<PostingList, Error> {
        self.get::<PostingList, PostingQuery>("/posting", Some(query))
            .await
    }

    /// Submits a correction for a posting's prediction.
    pub async fn submit_correction(&self, correction: &Correction) -> Result<(), Error> {
        self.post("/correction", correction).await
    }
}

async fn read_success_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        Error::Network(e)
    })?;

    if !status.is_success() {
        let snippet = truncate_body(&body);
        tracing::error!("Request failed with status {}: {}", status, snippet);
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body: snippet,
        });
    }
    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "ä".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::new("https://api.example.com/", "key").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        let url = client
            .get_url("/posting", Some(&PostingQuery::default()))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posting");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let client = Client::new("not a url", "key").unwrap();
        let err = client
            .get_url("/posting", None::<&PostingQuery>)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
