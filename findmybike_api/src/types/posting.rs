//! Posting types returned by the `/posting` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Prediction;

/// Identifier of a posting.
///
/// The service stores ids as integers but older payloads carry strings, so
/// both are accepted. Always serialized as a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostingId(String);

impl PostingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostingId {
    fn from(value: &str) -> Self {
        PostingId(value.to_string())
    }
}

impl From<String> for PostingId {
    fn from(value: String) -> Self {
        PostingId(value)
    }
}

impl From<i64> for PostingId {
    fn from(value: i64) -> Self {
        PostingId(value.to_string())
    }
}

impl Serialize for PostingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => PostingId::from(id),
            RawId::Str(id) => PostingId(id),
        })
    }
}

/// A single bicycle classified ad together with its prediction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Posting {
    /// Unique posting identifier.
    pub id: PostingId,

    /// Ad title as written by the seller.
    pub title: String,

    /// Link to the original ad.
    pub url: String,

    /// Link to the ad's main image.
    #[serde(rename = "img_url", alias = "image_url")]
    pub image_url: String,

    /// Free-text location of the seller.
    #[serde(default)]
    pub location: Option<String>,

    /// Publication date. The service sends either a date or a date-time.
    #[serde(default, with = "posting_date")]
    pub date: Option<NaiveDate>,

    /// Predicted aspects at fetch time.
    pub prediction: Prediction,
}

mod posting_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) => parse(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!("unrecognized posting date '{}'", raw))
            }),
        }
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.date())
    }
}
