//! Append-only edit history.
//!
//! One snapshot is pushed per completed edit cycle, from `stop_edit`, always
//! after a successful `save_state`. Every entry is therefore a fully
//! consistent state that can be loaded on its own.

use std::collections::VecDeque;

use crate::layer::LayerState;

/// Ordered sequence of layer snapshots, oldest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<LayerState>,
    limit: Option<usize>,
}

impl History {
    /// An unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` entries, evicting the oldest.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Append a snapshot.
    pub fn push(&mut self, state: LayerState) {
        if let Some(limit) = self.limit {
            while self.entries.len() >= limit.max(1) {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(state);
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&LayerState> {
        self.entries.back()
    }

    /// Iterate snapshots oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LayerState> {
        self.entries.iter()
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use uuid::Uuid;

    fn snapshot(name: &str) -> LayerState {
        LayerState::common("dot", Uuid::new_v4(), name, 0, None, "#FFFFFF", Point::ZERO)
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut history = History::new();
        history.push(snapshot("a"));
        history.push(snapshot("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|s| s.name.as_str()), Some("b"));
        let names: Vec<_> = history.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::with_limit(2);
        history.push(snapshot("a"));
        history.push(snapshot("b"));
        history.push(snapshot("c"));
        assert_eq!(history.len(), 2);
        let names: Vec<_> = history.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
    }
}
