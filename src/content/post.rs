//! Post and PostId models

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::PathBuf;

use crate::error::ContentError;

lazy_static! {
    /// Jekyll post naming: `YYYY-MM-DD-slug`
    static ref DATED_ID: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)$").unwrap();
}

/// Layout applied when a post does not name one
pub const DEFAULT_LAYOUT: &str = "post";

/// Unique key of a post within a collection
///
/// File-backed posts use their file stem, e.g. `2017-01-14-react-file-structure`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Create an identifier, trimming surrounding whitespace
    pub fn new(id: impl AsRef<str>) -> Result<Self, ContentError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ContentError::InvalidIdentifier(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Identifier for reporting a lookup key that may be blank
    pub(crate) fn unchecked(id: &str) -> Self {
        Self(id.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Date encoded in the `YYYY-MM-DD-` prefix, if any
    pub fn date(&self) -> Option<NaiveDate> {
        let caps = DATED_ID.captures(&self.0)?;
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// The part after the date prefix, or the whole id when undated
    pub fn slug(&self) -> &str {
        if self.date().is_some() {
            // prefix is exactly "YYYY-MM-DD-"
            &self.0[11..]
        } else {
            &self.0
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PostId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PostId {
    type Error = ContentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Presentation template name
    pub layout: String,

    /// Publication date
    pub published_date: NaiveDate,

    /// Raw markdown body (front-matter stripped)
    pub body: String,

    /// File the post was loaded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Front-matter fields this crate does not interpret
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a post with the default layout
    pub fn new(title: impl Into<String>, published_date: NaiveDate, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            layout: DEFAULT_LAYOUT.to_string(),
            published_date,
            body: body.into(),
            source: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }
}
