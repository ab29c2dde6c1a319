//! Wire schemas for the stories API.
//!
//! Responses decode into these DTOs first and are then mapped into domain
//! values, so a missing or mistyped field fails at the boundary instead of
//! leaking half-filled records into the collections.

use serde::{Deserialize, Serialize};

use super::{AuthGrant, Profile};
use crate::stories::StoryDraft;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub favorites: Vec<StoryRecord>,
    /// Stories authored by the user.
    #[serde(default)]
    pub stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoriesEnvelope {
    pub(super) stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoryEnvelope {
    pub(super) story: StoryRecord,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelope {
    pub(super) user: UserRecord,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthEnvelope {
    pub(super) user: UserRecord,
    pub(super) token: String,
}

/// `{"error": {"status": 401, "title": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub(super) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenBody<'a> {
    pub(super) token: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateStoryBody<'a> {
    pub(super) token: &'a str,
    pub(super) story: &'a StoryDraft,
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsBody<'a> {
    pub(super) user: CredentialsUser<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsUser<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) name: Option<&'a str>,
}

impl From<UserRecord> for Profile {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: record.favorites.into_iter().map(Into::into).collect(),
            stories: record.stories.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthEnvelope {
    pub(super) fn into_grant(self) -> AuthGrant {
        AuthGrant {
            profile: self.user.into(),
            token: self.token,
        }
    }
}

impl ErrorEnvelope {
    pub(super) fn into_message(self) -> Option<String> {
        self.error
            .message
            .or(self.error.title)
            .filter(|message| !message.trim().is_empty())
    }
}
