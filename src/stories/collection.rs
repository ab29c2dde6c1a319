use std::collections::HashMap;

use super::model::{Story, StoryId};

/// Insertion-ordered set of stories keyed by id.
///
/// Each entry remembers its slot in `order`. Removing a story blanks its slot
/// instead of shifting the vector, so removal is O(1); blank slots are
/// compacted away once they outnumber the live entries.
#[derive(Debug, Clone, Default)]
pub struct Stories {
    by_id: HashMap<StoryId, Entry>,
    order: Vec<Option<StoryId>>,
}

#[derive(Debug, Clone)]
struct Entry {
    slot: usize,
    story: Story,
}

impl Stories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Story> {
        self.by_id.get(id).map(|entry| &entry.story)
    }

    /// Appends a story, or replaces it in place when the id is already present.
    pub fn push(&mut self, story: Story) {
        if let Some(entry) = self.by_id.get_mut(&story.id) {
            entry.story = story;
            return;
        }
        let slot = self.order.len();
        self.order.push(Some(story.id.clone()));
        self.by_id.insert(story.id.clone(), Entry { slot, story });
    }

    /// Removes a story by id. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Story> {
        let entry = self.by_id.remove(id)?;
        if let Some(slot) = self.order.get_mut(entry.slot) {
            *slot = None;
        }
        if self.order.len() > 2 * self.by_id.len() + 8 {
            self.compact();
        }
        Some(entry.story)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> + '_ {
        self.ids().filter_map(|id| self.get(id.as_str()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &StoryId> + '_ {
        self.order.iter().flatten()
    }

    fn compact(&mut self) {
        self.order.retain(Option::is_some);
        for (slot, id) in self.order.iter().enumerate() {
            if let Some(entry) = id.as_ref().and_then(|id| self.by_id.get_mut(id)) {
                entry.slot = slot;
            }
        }
    }
}

// Equality is by content and order; blank slots are not observable.
impl PartialEq for Stories {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Stories {}

impl FromIterator<Story> for Stories {
    fn from_iter<I: IntoIterator<Item = Story>>(iter: I) -> Self {
        let mut stories = Self::new();
        for story in iter {
            stories.push(story);
        }
        stories
    }
}

impl<'a> IntoIterator for &'a Stories {
    type Item = &'a Story;
    type IntoIter = Box<dyn Iterator<Item = &'a Story> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
