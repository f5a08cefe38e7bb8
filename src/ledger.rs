//! Score ledger: the only place the score changes.

use crate::item::ItemId;
use std::collections::HashSet;

/// Result of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// First resolution for this identity; carries the new score.
    Scored(i64),
    /// Identity was resolved before; nothing changed.
    Duplicate,
}

#[derive(Debug, Default)]
pub struct ScoreLedger {
    score: i64,
    resolved: HashSet<ItemId>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `delta` once per identity. Later calls for the same `id` are no-ops.
    pub fn resolve(&mut self, id: ItemId, delta: i64) -> Applied {
        if !self.resolved.insert(id) {
            return Applied::Duplicate;
        }
        self.score += delta;
        Applied::Scored(self.score)
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[cfg(test)]
    pub fn is_resolved(&self, id: ItemId) -> bool {
        self.resolved.contains(&id)
    }

    #[cfg(test)]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn clear(&mut self) {
        self.score = 0;
        self.resolved.clear();
    }
}
