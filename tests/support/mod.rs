//! In-memory stand-in for the stories API.
//!
//! Mirrors the server's observable contract closely enough for session tests:
//! tokens are checked, ids are issued sequentially, unknown ids are `NotFound`,
//! and every call is recorded so tests can assert that no request was made.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use snooze::api::{AuthGrant, Profile, StoryApi};
use snooze::{Error, Result, Story, StoryDraft, StoryId};

pub const PASSWORD: &str = "hunter2";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    name: String,
    token: String,
    favorites: Vec<StoryId>,
}

#[derive(Debug, Default)]
struct State {
    stories: Vec<Story>,
    accounts: HashMap<String, Account>,
    next_id: u32,
    calls: Vec<&'static str>,
    fail_next: Option<Error>,
}

#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

pub fn story(id: &str, username: &str) -> Story {
    Story {
        id: StoryId::new(id),
        title: format!("Story {id}"),
        author: format!("Author {id}"),
        url: format!("https://example.com/{id}"),
        username: username.to_owned(),
        created_at: "2024-03-01T12:00:00.000Z".to_owned(),
    }
}

impl FakeApi {
    /// Server seeded with stories "1" and "2" and one account, `ferris`,
    /// whose token is `token-ferris`.
    pub fn seeded() -> Self {
        let api = Self::default();
        {
            let mut state = api.state();
            state.stories = vec![story("1", "someone"), story("2", "ferris")];
            state.next_id = 3;
            state.accounts.insert(
                "ferris".to_owned(),
                Account {
                    password: PASSWORD.to_owned(),
                    name: "Ferris".to_owned(),
                    token: "token-ferris".to_owned(),
                    favorites: Vec::new(),
                },
            );
        }
        api
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake api state poisoned")
    }

    /// Makes the next call fail with `error` before it touches any state.
    pub fn fail_next(&self, error: Error) {
        self.state().fail_next = Some(error);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub fn server_story_ids(&self) -> Vec<String> {
        self.state()
            .stories
            .iter()
            .map(|s| s.id.as_str().to_owned())
            .collect()
    }

    pub fn server_favorites(&self, username: &str) -> Vec<String> {
        self.state()
            .accounts
            .get(username)
            .map(|account| {
                account
                    .favorites
                    .iter()
                    .map(|id| id.as_str().to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drops a story on the server side only, leaving clients stale.
    pub fn delete_behind_the_scenes(&self, id: &str) {
        self.state().stories.retain(|s| s.id.as_str() != id);
    }

    pub fn set_favorites(&self, username: &str, ids: &[&str]) {
        if let Some(account) = self.state().accounts.get_mut(username) {
            account.favorites = ids.iter().map(|id| StoryId::new(*id)).collect();
        }
    }
}

impl State {
    fn begin(&mut self, call: &'static str) -> Result<()> {
        self.calls.push(call);
        match self.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn account_for_token(&mut self, token: &str, username: Option<&str>) -> Result<&mut Account> {
        let (name, account) = self
            .accounts
            .iter_mut()
            .find(|(_, account)| account.token == token)
            .ok_or_else(|| Error::auth("status 401: invalid token"))?;
        if username.is_some_and(|expected| expected != name.as_str()) {
            return Err(Error::auth("status 401: token does not match user"));
        }
        Ok(account)
    }

    fn profile(&self, username: &str) -> Result<Profile> {
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| Error::not_found(format!("status 404: no user {username}")))?;
        let lookup = |id: &StoryId| self.stories.iter().find(|s| &s.id == id).cloned();
        Ok(Profile {
            username: username.to_owned(),
            name: account.name.clone(),
            created_at: "2024-01-01T00:00:00.000Z".to_owned(),
            favorites: account.favorites.iter().filter_map(lookup).collect(),
            stories: self
                .stories
                .iter()
                .filter(|s| s.username == username)
                .cloned()
                .collect(),
        })
    }
}

#[async_trait]
impl StoryApi for FakeApi {
    async fn list_stories(&self) -> Result<Vec<Story>> {
        let mut state = self.state();
        state.begin("list_stories")?;
        Ok(state.stories.clone())
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> Result<Story> {
        let mut state = self.state();
        state.begin("create_story")?;
        state.account_for_token(token, None)?;
        let username = state
            .accounts
            .iter()
            .find(|(_, account)| account.token == token)
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        if url::Url::parse(&draft.url).is_err() {
            return Err(Error::validation("status 400: url must be a valid URL"));
        }
        let story = Story {
            id: StoryId::new(state.next_id.to_string()),
            title: draft.title.clone(),
            author: draft.author.clone(),
            url: draft.url.clone(),
            username,
            created_at: "2024-03-02T08:00:00.000Z".to_owned(),
        };
        state.next_id += 1;
        state.stories.push(story.clone());
        Ok(story)
    }

    async fn delete_story(&self, token: &str, id: &StoryId) -> Result<()> {
        let mut state = self.state();
        state.begin("delete_story")?;
        state.account_for_token(token, None)?;
        let before = state.stories.len();
        state.stories.retain(|s| &s.id != id);
        if state.stories.len() == before {
            return Err(Error::not_found(format!("status 404: no story {id}")));
        }
        for account in state.accounts.values_mut() {
            account.favorites.retain(|fav| fav != id);
        }
        Ok(())
    }

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthGrant> {
        let mut state = self.state();
        state.begin("signup")?;
        if state.accounts.contains_key(username) {
            return Err(Error::validation(format!(
                "status 409: There is already a user with username '{username}'"
            )));
        }
        let token = format!("token-{username}");
        state.accounts.insert(
            username.to_owned(),
            Account {
                password: password.to_owned(),
                name: name.to_owned(),
                token: token.clone(),
                favorites: Vec::new(),
            },
        );
        let profile = state.profile(username)?;
        Ok(AuthGrant { profile, token })
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant> {
        let mut state = self.state();
        state.begin("login")?;
        let account = state
            .accounts
            .get(username)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("status 404: no user {username}")))?;
        if account.password != password {
            return Err(Error::auth("status 401: invalid password"));
        }
        let profile = state.profile(username)?;
        Ok(AuthGrant {
            profile,
            token: account.token,
        })
    }

    async fn get_user(&self, token: &str, username: &str) -> Result<Profile> {
        let mut state = self.state();
        state.begin("get_user")?;
        state.account_for_token(token, Some(username))?;
        state.profile(username)
    }

    async fn add_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()> {
        let mut state = self.state();
        state.begin("add_favorite")?;
        if !state.stories.iter().any(|s| &s.id == id) {
            return Err(Error::not_found(format!("status 404: no story {id}")));
        }
        let account = state.account_for_token(token, Some(username))?;
        if !account.favorites.contains(id) {
            account.favorites.push(id.clone());
        }
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, username: &str, id: &StoryId) -> Result<()> {
        let mut state = self.state();
        state.begin("remove_favorite")?;
        let account = state.account_for_token(token, Some(username))?;
        account.favorites.retain(|fav| fav != id);
        Ok(())
    }
}
