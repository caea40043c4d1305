//! Undo/redo history of map views.
//!
//! Map-move callbacks fire on every animation frame, so [`ViewHistory::push`]
//! drops snapshots equal to the current one instead of trusting the caller
//! to debounce.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Map view as reported by the mapping engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub center: [f64; 2],
    pub zoom: f64,
    pub rotation: f64,
}

impl ViewSnapshot {
    pub fn new(center: [f64; 2], zoom: f64, rotation: f64) -> Self {
        Self {
            center,
            zoom,
            rotation,
        }
    }
}

/// Outbound "set view" primitive of the mapping engine.
pub trait MapView {
    fn set_view(&mut self, view: &ViewSnapshot);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewHistory {
    past: Vec<ViewSnapshot>,
    present: Option<ViewSnapshot>,
    future: VecDeque<ViewSnapshot>,
    limit: Option<usize>,
}

impl ViewHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` past entries; the oldest are dropped.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn past(&self) -> &[ViewSnapshot] {
        &self.past
    }

    pub fn present(&self) -> Option<&ViewSnapshot> {
        self.present.as_ref()
    }

    /// Next entry first.
    pub fn future(&self) -> impl Iterator<Item = &ViewSnapshot> {
        self.future.iter()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record a new view. Returns `false` when `view` equals the present.
    pub fn push(&mut self, view: ViewSnapshot) -> bool {
        if self.present.as_ref() == Some(&view) {
            return false;
        }
        if let Some(present) = self.present.take() {
            self.past.push(present);
            if let Some(limit) = self.limit
                && self.past.len() > limit
            {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
        self.present = Some(view);
        self.future.clear();
        true
    }

    pub fn go_back(&mut self) -> Option<&ViewSnapshot> {
        let previous = self.past.pop()?;
        if let Some(present) = self.present.replace(previous) {
            self.future.push_front(present);
        }
        tracing::debug!(view = ?previous, "view history back");
        self.present.as_ref()
    }

    pub fn go_forward(&mut self) -> Option<&ViewSnapshot> {
        let next = self.future.pop_front()?;
        if let Some(present) = self.present.replace(next) {
            self.past.push(present);
        }
        tracing::debug!(view = ?next, "view history forward");
        self.present.as_ref()
    }

    /// Step back and hand the restored view to `map`.
    pub fn go_back_on(&mut self, map: &mut impl MapView) -> bool {
        match self.go_back() {
            Some(view) => {
                map.set_view(view);
                true
            }
            None => false,
        }
    }

    /// Step forward and hand the restored view to `map`.
    pub fn go_forward_on(&mut self, map: &mut impl MapView) -> bool {
        match self.go_forward() {
            Some(view) => {
                map.set_view(view);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.present = None;
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(x: f64, zoom: f64) -> ViewSnapshot {
        ViewSnapshot::new([x, x], zoom, 0.0)
    }

    #[test]
    fn push_then_back_moves_present_to_future() {
        let mut history = ViewHistory::new();
        assert!(history.push(view(0.0, 5.0)));
        assert!(history.past().is_empty());
        assert!(history.push(view(1.0, 6.0)));
        assert_eq!(history.past(), [view(0.0, 5.0)]);

        assert_eq!(history.go_back(), Some(&view(0.0, 5.0)));
        assert!(history.past().is_empty());
        assert_eq!(history.future().copied().collect::<Vec<_>>(), [view(1.0, 6.0)]);
    }

    #[test]
    fn duplicate_push_changes_nothing() {
        let mut history = ViewHistory::new();
        history.push(view(0.0, 5.0));
        history.push(view(1.0, 6.0));
        history.go_back();
        let before = history.clone();

        assert!(!history.push(view(0.0, 5.0)));
        assert_eq!(history, before);
    }

    #[test]
    fn rotation_alone_makes_a_new_entry() {
        let mut history = ViewHistory::new();
        history.push(ViewSnapshot::new([2.0, 3.0], 4.0, 0.0));
        assert!(history.push(ViewSnapshot::new([2.0, 3.0], 4.0, 0.5)));
        assert_eq!(history.past().len(), 1);
    }

    #[test]
    fn back_then_forward_round_trips() {
        let mut history = ViewHistory::new();
        for i in 0..4 {
            history.push(view(i as f64, 10.0 + i as f64));
        }
        history.go_back();
        let before = history.clone();

        history.go_back();
        history.go_forward();
        assert_eq!(history, before);
    }

    #[test]
    fn push_discards_the_redo_branch() {
        let mut history = ViewHistory::new();
        history.push(view(0.0, 1.0));
        history.push(view(1.0, 2.0));
        history.go_back();
        assert!(history.can_go_forward());

        history.push(view(9.0, 9.0));
        assert!(!history.can_go_forward());
        assert_eq!(history.past(), [view(0.0, 1.0)]);
    }

    #[test]
    fn navigation_on_empty_ends_is_a_noop() {
        let mut history = ViewHistory::new();
        assert!(history.go_back().is_none());
        assert!(history.go_forward().is_none());
        history.push(view(0.0, 1.0));
        assert!(history.go_back().is_none());
        assert_eq!(history.present(), Some(&view(0.0, 1.0)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut history = ViewHistory::new();
        history.push(view(0.0, 1.0));
        history.push(view(1.0, 2.0));
        history.go_back();
        history.clear();
        assert_eq!(history, ViewHistory::new());
    }

    #[test]
    fn limit_drops_oldest_past_entries() {
        let mut history = ViewHistory::with_limit(2);
        for i in 0..5 {
            history.push(view(i as f64, 1.0));
        }
        assert_eq!(history.past(), [view(2.0, 1.0), view(3.0, 1.0)]);
        assert_eq!(history.present(), Some(&view(4.0, 1.0)));
    }

    #[derive(Default)]
    struct RecordingMap(Vec<ViewSnapshot>);

    impl MapView for RecordingMap {
        fn set_view(&mut self, view: &ViewSnapshot) {
            self.0.push(*view);
        }
    }

    #[test]
    fn restored_views_are_sent_to_the_map() {
        let mut history = ViewHistory::new();
        let mut map = RecordingMap::default();
        history.push(view(0.0, 1.0));
        history.push(view(1.0, 2.0));

        assert!(history.go_back_on(&mut map));
        assert!(!history.go_back_on(&mut map));
        assert!(history.go_forward_on(&mut map));
        assert_eq!(map.0, [view(0.0, 1.0), view(1.0, 2.0)]);
    }
}
