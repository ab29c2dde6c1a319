//! Typed binding for the remote stories API.
//!
//! [`StoryApi`] is the seam between the session logic and the transport: the
//! collections only ever talk to the trait, [`HttpApi`] implements it over
//! reqwest, and tests substitute an in-memory fake.

pub mod dto;
mod http;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::stories::{Story, StoryDraft, StoryId};

pub use http::HttpApi;

pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_USER_AGENT: &str = concat!("snooze/", env!("CARGO_PKG_VERSION"));

/// Account data echoed back by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub created_at: String,
    pub favorites: Vec<Story>,
    /// Stories the account authored.
    pub stories: Vec<Story>,
}

/// Result of a signup or login: the profile plus a freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub profile: Profile,
    pub token: String,
}

/// Remote operations the client needs. Every call is one-shot.
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// `GET /stories`
    async fn list_stories(&self) -> Result<Vec<Story>>;

    /// `POST /stories`
    async fn create_story(&self, token: &str, draft: &StoryDraft) -> Result<Story>;

    /// `DELETE /stories/{id}`
    async fn delete_story(&self, token: &str, id: &StoryId) -> Result<()>;

    /// `POST /signup`
    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthGrant>;

    /// `POST /login`
    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant>;

    /// `GET /users/{username}?token=...`
    async fn get_user(&self, token: &str, username: &str) -> Result<Profile>;

    /// `POST /users/{username}/favorites/{id}`
    async fn add_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()>;

    /// `DELETE /users/{username}/favorites/{id}`
    async fn remove_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()>;
}

/// Transport settings for [`HttpApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Upper bound for a whole request, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}
