use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use url::Url;

use crate::api::dto::StoryRecord;
use crate::error::{Error, Result};

/// Server-issued story identifier. Stable and unique within any collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single story as listed by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the account that submitted the story.
    pub username: String,
    pub created_at: String,
}

impl Story {
    /// Host portion of the story url, including a non-default port.
    ///
    /// Fails with [`Error::InvalidUrl`] for relative or host-less urls; callers
    /// show a placeholder instead of aborting the render.
    pub fn hostname(&self) -> Result<String> {
        let parsed =
            Url::parse(&self.url).map_err(|err| Error::invalid_url(&self.url, err.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::invalid_url(&self.url, "url has no host"))?;
        Ok(match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: StoryId(record.story_id),
            title: record.title,
            author: record.author,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

/// Fields a user submits when posting a new story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl StoryDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    /// Rejects blank fields before anything is sent.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("url", &self.url),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
