use tracing::{debug, info};

use super::collection::Stories;
use super::model::{Story, StoryDraft, StoryId};
use crate::api::StoryApi;
use crate::error::Result;
use crate::user::User;

/// The global feed, in the order the server returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryList {
    stories: Stories,
}

impl StoryList {
    pub fn new(stories: impl IntoIterator<Item = Story>) -> Self {
        Self {
            stories: stories.into_iter().collect(),
        }
    }

    /// Fetches the whole feed. The result replaces any list the caller holds.
    pub async fn fetch_all<A>(api: &A) -> Result<Self>
    where
        A: StoryApi + ?Sized,
    {
        let stories = api.list_stories().await?;
        debug!(count = stories.len(), "fetched stories");
        Ok(Self::new(stories))
    }

    /// Posts a new story as `author` and records it here and in the author's
    /// own stories. Nothing changes locally unless the server accepts it.
    pub async fn add_story<A>(
        &mut self,
        api: &A,
        author: &mut User,
        draft: StoryDraft,
    ) -> Result<Story>
    where
        A: StoryApi + ?Sized,
    {
        draft.validate()?;
        let token = author.require_token()?;
        let story = api.create_story(token, &draft).await?;
        info!(story_id = %story.id, username = author.username(), "posted story");

        self.stories.push(story.clone());
        author.record_authored(story.clone());
        Ok(story)
    }

    /// Deletes a story and drops it from this list and from `user`'s own and
    /// favorite stories.
    ///
    /// An id that no local collection holds counts as already removed: no
    /// request is made and the call succeeds. A server-side `NotFound` while
    /// the id is still held locally is returned unchanged: local state is
    /// stale and the caller should re-fetch.
    pub async fn remove_story<A>(
        &mut self,
        api: &A,
        user: &mut User,
        story_id: &StoryId,
    ) -> Result<()>
    where
        A: StoryApi + ?Sized,
    {
        if !self.contains(story_id) && !user.holds(story_id) {
            debug!(%story_id, "story already removed");
            return Ok(());
        }
        let token = user.require_token()?;
        api.delete_story(token, story_id).await?;
        info!(%story_id, "deleted story");

        self.stories.remove(story_id.as_str());
        user.forget_story(story_id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.stories.contains(id.as_str())
    }

    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.stories.get(id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> + '_ {
        self.stories.iter()
    }
}
