//! Levels the presentation layer must still draw
//!
//! Holds the current level and, while the snake is walking out of it, the
//! previous one. Every change is reported back to the caller so it can be
//! published on the event channel.

use super::level::LevelId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleLevels {
    ids: Vec<LevelId>,
}

impl VisibleLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.ids.contains(&id)
    }

    /// Append a level; returns false if it was already listed
    pub fn push(&mut self, id: LevelId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a level; returns false if it was not listed
    pub fn remove(&mut self, id: LevelId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&listed| listed != id);
        self.ids.len() != before
    }

    /// Remove everything, returning what was listed (in order)
    pub fn clear(&mut self) -> Vec<LevelId> {
        std::mem::take(&mut self.ids)
    }

    pub fn ids(&self) -> &[LevelId] {
        &self.ids
    }
}
