//! The logged-in account: identity, token, and the two per-user collections.

use tracing::{debug, info, warn};

use crate::api::{AuthGrant, Profile, StoryApi};
use crate::error::{Error, Result};
use crate::stories::{Stories, Story, StoryId};

/// An authenticated session for one account.
///
/// `favorited` holds copies of stories from the global list; membership is by
/// id only, so dropping a favorite never touches the global list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
    created_at: String,
    token: String,
    authored: Stories,
    favorited: Stories,
}

impl User {
    pub fn from_profile(profile: Profile, token: impl Into<String>) -> Self {
        Self {
            username: profile.username,
            name: profile.name,
            created_at: profile.created_at,
            token: token.into(),
            authored: profile.stories.into_iter().collect(),
            favorited: profile.favorites.into_iter().collect(),
        }
    }

    fn from_grant(grant: AuthGrant) -> Self {
        Self::from_profile(grant.profile, grant.token)
    }

    /// Registers a new account and returns its session.
    pub async fn signup<A>(api: &A, username: &str, password: &str, name: &str) -> Result<Self>
    where
        A: StoryApi + ?Sized,
    {
        for (field, value) in [("username", username), ("password", password), ("name", name)] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("{field} must not be empty")));
            }
        }
        let grant = api.signup(username, password, name).await?;
        info!(username = %grant.profile.username, "signed up");
        Ok(Self::from_grant(grant))
    }

    /// Logs in with a username and password.
    ///
    /// An unknown username is reported as [`Error::Auth`], same as a wrong
    /// password.
    pub async fn login<A>(api: &A, username: &str, password: &str) -> Result<Self>
    where
        A: StoryApi + ?Sized,
    {
        let grant = api
            .login(username, password)
            .await
            .map_err(|err| match err {
                Error::NotFound { message } => Error::auth(message),
                other => other,
            })?;
        info!(username = %grant.profile.username, "logged in");
        Ok(Self::from_grant(grant))
    }

    /// Rebuilds a session from a previously issued token.
    ///
    /// Never fails: any error (expired token, unknown user, network) is logged
    /// and yields `None` so the caller can fall back to a logged-out state.
    pub async fn restore_session<A>(api: &A, token: &str, username: &str) -> Option<Self>
    where
        A: StoryApi + ?Sized,
    {
        if token.is_empty() || username.is_empty() {
            debug!("no stored credentials to restore");
            return None;
        }
        match api.get_user(token, username).await {
            Ok(profile) => {
                info!(%username, "restored session");
                Some(Self::from_profile(profile, token))
            }
            Err(err) => {
                warn!(%username, error = %err, "session restore failed");
                None
            }
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authored(&self) -> &Stories {
        &self.authored
    }

    pub fn favorited(&self) -> &Stories {
        &self.favorited
    }

    pub fn owns(&self, story: &Story) -> bool {
        self.authored.contains(story.id.as_str())
    }

    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorited.contains(story.id.as_str())
    }

    /// Brings favorite membership of `story` to `favorited`.
    ///
    /// Matching membership is a no-op with no network call. Otherwise the
    /// remote call must succeed before local membership changes.
    pub async fn set_favorite<A>(&mut self, api: &A, story: &Story, favorited: bool) -> Result<()>
    where
        A: StoryApi + ?Sized,
    {
        if self.is_favorite(story) == favorited {
            return Ok(());
        }
        let token = self.require_token()?;
        if favorited {
            api.add_favorite(token, &self.username, &story.id).await?;
            self.favorited.push(story.clone());
            debug!(story_id = %story.id, "added favorite");
        } else {
            api.remove_favorite(token, &self.username, &story.id).await?;
            self.favorited.remove(story.id.as_str());
            debug!(story_id = %story.id, "removed favorite");
        }
        Ok(())
    }

    pub(crate) fn require_token(&self) -> Result<&str> {
        if self.token.is_empty() {
            Err(Error::auth("no login token for this session"))
        } else {
            Ok(&self.token)
        }
    }

    pub(crate) fn holds(&self, id: &StoryId) -> bool {
        self.authored.contains(id.as_str()) || self.favorited.contains(id.as_str())
    }

    pub(crate) fn record_authored(&mut self, story: Story) {
        self.authored.push(story);
    }

    pub(crate) fn forget_story(&mut self, id: &StoryId) {
        self.authored.remove(id.as_str());
        self.favorited.remove(id.as_str());
    }
}
