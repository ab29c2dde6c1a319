//! Client core for the Hack or Snooze stories feed.
//!
//! [`StoryList`] and [`User`] hold the session state; every remote call goes
//! through a [`StoryApi`] passed in explicitly, normally an [`HttpApi`].

pub mod api;
pub mod error;
pub mod stories;
pub mod user;

pub use api::{ApiConfig, HttpApi, StoryApi};
pub use error::{Error, Result};
pub use stories::{Stories, Story, StoryDraft, StoryId, StoryList};
pub use user::User;
