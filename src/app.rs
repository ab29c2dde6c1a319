//! Interactive session: the state a run works with plus the menu handlers.

use anyhow::Result;
use snooze::{Error, HttpApi, Story, StoryDraft, StoryList, User};
use time::OffsetDateTime;
use tracing::warn;

use crate::config::RuntimeConfig;
use crate::credentials::{CredentialStore, StoredCredentials};
use crate::open_url::open_url;
use crate::render::{logout_label, story_label};
use crate::ui::{self, MenuChoice};
use crate::util::sanitize::sanitize_for_terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AllStories,
    Favorites,
    MyStories,
    Submit,
    Refresh,
    Login,
    Signup,
    Logout,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    All,
    Favorites,
    Mine,
}

impl View {
    fn title(self) -> &'static str {
        match self {
            View::All => "All stories",
            View::Favorites => "Favorite stories",
            View::Mine => "My stories",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoryAction {
    Open,
    Favorite,
    Unfavorite,
    Delete,
}

pub struct Session {
    api: HttpApi,
    cfg: RuntimeConfig,
    credentials: CredentialStore,
    stories: StoryList,
    user: Option<User>,
}

impl Session {
    /// Restores any stored login and loads the feed.
    ///
    /// Neither step is fatal: a stale token means starting logged out, and an
    /// unreachable API means an empty feed until the next refresh.
    pub async fn start(api: HttpApi, cfg: RuntimeConfig, credentials: CredentialStore) -> Self {
        let user = match credentials.load() {
            Some(creds) => User::restore_session(&api, &creds.token, &creds.username).await,
            None => None,
        };
        let stories = match StoryList::fetch_all(&api).await {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, "could not load stories");
                StoryList::default()
            }
        };
        Self {
            api,
            cfg,
            credentials,
            stories,
            user,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let actions = self.main_actions();
            let labels: Vec<String> = actions.iter().map(|(_, label)| label.clone()).collect();
            let choice = ui::prompt_menu("Hack or Snooze", &labels, self.cfg.header.as_deref())?;
            let action = match choice {
                MenuChoice::Back => Action::Quit,
                MenuChoice::Index(i) => actions.get(i).map_or(Action::Quit, |(a, _)| *a),
            };
            match action {
                Action::AllStories => self.browse(View::All).await?,
                Action::Favorites => self.browse(View::Favorites).await?,
                Action::MyStories => self.browse(View::Mine).await?,
                Action::Submit => self.submit().await?,
                Action::Refresh => self.refresh().await?,
                Action::Login => self.login().await?,
                Action::Signup => self.signup().await?,
                Action::Logout => self.logout()?,
                Action::Quit => break,
            }
        }
        Ok(())
    }

    fn main_actions(&self) -> Vec<(Action, String)> {
        let mut actions = vec![(Action::AllStories, format!("All stories ({})", self.stories.len()))];
        match &self.user {
            Some(user) => {
                actions.push((Action::Favorites, format!("Favorites ({})", user.favorited().len())));
                actions.push((Action::MyStories, format!("My stories ({})", user.authored().len())));
                actions.push((Action::Submit, "Submit a story".to_owned()));
                actions.push((Action::Refresh, "Refresh".to_owned()));
                actions.push((Action::Logout, logout_label(user.username(), user.created_at())));
            }
            None => {
                actions.push((Action::Refresh, "Refresh".to_owned()));
                actions.push((Action::Login, "Log in".to_owned()));
                actions.push((Action::Signup, "Sign up".to_owned()));
            }
        }
        actions.push((Action::Quit, "Quit".to_owned()));
        actions
    }

    fn stories_in(&self, view: View) -> Vec<Story> {
        match (view, &self.user) {
            (View::All, _) => self.stories.iter().cloned().collect(),
            (View::Favorites, Some(user)) => user.favorited().iter().cloned().collect(),
            (View::Mine, Some(user)) => user.authored().iter().cloned().collect(),
            (_, None) => Vec::new(),
        }
    }

    async fn browse(&mut self, view: View) -> Result<()> {
        loop {
            let stories = self.stories_in(view);
            let now = OffsetDateTime::now_utc();
            let labels: Vec<String> = stories
                .iter()
                .map(|s| story_label(s, self.user.as_ref(), now))
                .collect();
            match ui::prompt_menu(view.title(), &labels, self.cfg.header.as_deref())? {
                MenuChoice::Back => return Ok(()),
                MenuChoice::Index(i) => {
                    if let Some(story) = stories.get(i) {
                        self.story_menu(story).await?;
                    }
                }
            }
        }
    }

    async fn story_menu(&mut self, story: &Story) -> Result<()> {
        let mut actions = vec![(StoryAction::Open, "Open link".to_owned())];
        if let Some(user) = &self.user {
            if user.is_favorite(story) {
                actions.push((StoryAction::Unfavorite, "Remove from favorites".to_owned()));
            } else {
                actions.push((StoryAction::Favorite, "Add to favorites".to_owned()));
            }
            if user.owns(story) {
                actions.push((StoryAction::Delete, "Delete story".to_owned()));
            }
        }
        let labels: Vec<String> = actions.iter().map(|(_, label)| label.clone()).collect();
        let title = story_label(story, self.user.as_ref(), OffsetDateTime::now_utc());
        let action = match ui::prompt_menu(&title, &labels, self.cfg.header.as_deref())? {
            MenuChoice::Back => return Ok(()),
            MenuChoice::Index(i) => match actions.get(i) {
                Some((action, _)) => *action,
                None => return Ok(()),
            },
        };

        match action {
            StoryAction::Open => {
                if let Err(err) = open_url(&story.url, self.cfg.open_command.as_deref()) {
                    ui::show_error(&format!("{err:#}"))?;
                }
            }
            StoryAction::Favorite | StoryAction::Unfavorite => {
                let Some(user) = self.user.as_mut() else { return Ok(()) };
                let favorited = action == StoryAction::Favorite;
                let result = user.set_favorite(&self.api, story, favorited).await;
                if let Err(err) = result {
                    self.report(err).await?;
                }
            }
            StoryAction::Delete => {
                if !ui::confirm(&format!("Delete \"{}\"?", sanitize_for_terminal(&story.title, 80)))? {
                    return Ok(());
                }
                let Some(user) = self.user.as_mut() else { return Ok(()) };
                let result = self.stories.remove_story(&self.api, user, &story.id).await;
                match result {
                    Ok(()) => ui::notify("Story deleted.")?,
                    Err(err) => self.report(err).await?,
                }
            }
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        let title = ui::prompt_text("Title")?;
        let author = ui::prompt_text("Author")?;
        let url = ui::prompt_text("URL")?;
        let Some(user) = self.user.as_mut() else { return Ok(()) };

        let draft = StoryDraft::new(title, author, url);
        let result = self.stories.add_story(&self.api, user, draft).await;
        match result {
            Ok(story) => {
                ui::notify(&format!("Posted \"{}\".", sanitize_for_terminal(&story.title, 80)))?;
                // Pick up anything else posted in the meantime.
                self.refresh().await
            }
            Err(err) => self.report(err).await,
        }
    }

    async fn refresh(&mut self) -> Result<()> {
        match StoryList::fetch_all(&self.api).await {
            Ok(list) => self.stories = list,
            Err(err) => ui::show_error(&format!("Could not refresh stories: {err}"))?,
        }
        Ok(())
    }

    async fn login(&mut self) -> Result<()> {
        let username = ui::prompt_text("Username")?;
        let password = ui::prompt_password("Password")?;
        let result = User::login(&self.api, &username, &password).await;
        match result {
            Ok(user) => self.begin_session(user),
            Err(err) => self.report(err).await,
        }
    }

    async fn signup(&mut self) -> Result<()> {
        let name = ui::prompt_text("Name")?;
        let username = ui::prompt_text("Username")?;
        let password = ui::prompt_password("Password")?;
        let result = User::signup(&self.api, &username, &password, &name).await;
        match result {
            Ok(user) => self.begin_session(user),
            Err(err) => self.report(err).await,
        }
    }

    fn begin_session(&mut self, user: User) -> Result<()> {
        let creds = StoredCredentials {
            username: user.username().to_owned(),
            token: user.token().to_owned(),
        };
        if let Err(err) = self.credentials.save(&creds) {
            warn!(error = %err, "failed to store credentials");
        }
        self.user = Some(user);
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.credentials.clear()
    }

    /// Shows a failed operation and resynchronises state where it may be stale.
    async fn report(&mut self, err: Error) -> Result<()> {
        ui::show_error(&err.to_string())?;
        match err {
            Error::NotFound { .. } => {
                self.refresh().await?;
                self.reload_user().await;
            }
            Error::Auth { .. } if self.user.is_some() => {
                // Token rejected: drop the session and force a fresh login.
                self.logout()?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn reload_user(&mut self) {
        let Some(user) = &self.user else { return };
        let (token, username) = (user.token().to_owned(), user.username().to_owned());
        if let Some(fresh) = User::restore_session(&self.api, &token, &username).await {
            self.user = Some(fresh);
        }
    }
}
