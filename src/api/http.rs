//! Reqwest-backed implementation of [`StoryApi`].
//!
//! Owns transport details only: endpoint construction, request bodies,
//! timeout and status mapping, and decoding into domain values.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::{
    AuthEnvelope, CreateStoryBody, CredentialsBody, CredentialsUser, ErrorEnvelope,
    StoriesEnvelope, StoryEnvelope, TokenBody, UserEnvelope,
};
use super::{ApiConfig, AuthGrant, Profile, StoryApi};
use crate::error::{Error, Result};
use crate::stories::{Story, StoryDraft, StoryId};

pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Builds a client with the configured timeouts applied to every call.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(Error::validation(format!(
                "base url {} cannot carry a path",
                config.base_url
            )));
        }
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|err| Error::network(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.base_url, segments)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Vec<u8>> {
        let path = url.path().to_owned();
        debug!(%method, %path, "sending request");
        let request = build(self.client.request(method.clone(), url));
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%method, %path, status = status.as_u16(), bytes = body.len(), "received response");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl StoryApi for HttpApi {
    async fn list_stories(&self) -> Result<Vec<Story>> {
        let url = self.endpoint(&["stories"])?;
        let body = self.send(Method::GET, url, |req| req).await?;
        let envelope: StoriesEnvelope = decode(&body)?;
        Ok(envelope.stories.into_iter().map(Story::from).collect())
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> Result<Story> {
        let url = self.endpoint(&["stories"])?;
        let payload = CreateStoryBody { token, story: draft };
        let body = self.send(Method::POST, url, |req| req.json(&payload)).await?;
        let envelope: StoryEnvelope = decode(&body)?;
        Ok(envelope.story.into())
    }

    async fn delete_story(&self, token: &str, id: &StoryId) -> Result<()> {
        let url = self.endpoint(&["stories", id.as_str()])?;
        let payload = TokenBody { token };
        self.send(Method::DELETE, url, |req| req.json(&payload)).await?;
        Ok(())
    }

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthGrant> {
        let url = self.endpoint(&["signup"])?;
        let payload = CredentialsBody {
            user: CredentialsUser {
                username,
                password,
                name: Some(name),
            },
        };
        let body = self.send(Method::POST, url, |req| req.json(&payload)).await?;
        let envelope: AuthEnvelope = decode(&body)?;
        Ok(envelope.into_grant())
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant> {
        let url = self.endpoint(&["login"])?;
        let payload = CredentialsBody {
            user: CredentialsUser {
                username,
                password,
                name: None,
            },
        };
        let body = self.send(Method::POST, url, |req| req.json(&payload)).await?;
        let envelope: AuthEnvelope = decode(&body)?;
        Ok(envelope.into_grant())
    }

    async fn get_user(&self, token: &str, username: &str) -> Result<Profile> {
        let url = self.endpoint(&["users", username])?;
        let body = self
            .send(Method::GET, url, |req| req.query(&[("token", token)]))
            .await?;
        let envelope: UserEnvelope = decode(&body)?;
        Ok(envelope.user.into())
    }

    async fn add_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()> {
        let url = self.endpoint(&["users", username, "favorites", id.as_str()])?;
        let payload = TokenBody { token };
        self.send(Method::POST, url, |req| req.json(&payload)).await?;
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()> {
        let url = self.endpoint(&["users", username, "favorites", id.as_str()])?;
        let payload = TokenBody { token };
        self.send(Method::DELETE, url, |req| req.json(&payload)).await?;
        Ok(())
    }
}

/// Appends percent-encoded path segments to the base url.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| Error::validation(format!("base url {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| Error::decode(err.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::network(format!("request timed out: {error}"))
    } else {
        Error::network(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> Error {
    let detail = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(ErrorEnvelope::into_message)
        .unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::auth(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Error::network(message),
        _ if status.is_client_error() => Error::validation(message),
        _ => Error::network(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
