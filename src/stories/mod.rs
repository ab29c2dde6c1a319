mod collection;
mod list;
mod model;

pub use collection::Stories;
pub use list::StoryList;
pub use model::{Story, StoryDraft, StoryId};
