//! Paint order derived from a most-recent-first list of window ids.
//!
//! The list is the only stored state; z-indices are recomputed from it on
//! every query so they can never drift from the focus history.

use crate::constants::Z_INDEX_BASE;

/// `Z_INDEX_BASE - position` for stacked ids, `0` for ids never focused.
pub fn z_index_for(order: &[String], id: &str) -> i32 {
    match order.iter().position(|entry| entry == id) {
        Some(idx) => Z_INDEX_BASE.saturating_sub(i32::try_from(idx).unwrap_or(i32::MAX)),
        None => 0,
    }
}

pub fn bring_to_front(order: &[String], id: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(order.len() + 1);
    next.push(id.to_owned());
    next.extend(order.iter().filter(|entry| *entry != id).cloned());
    next
}

pub fn remove_from_order(order: &[String], id: &str) -> Vec<String> {
    order.iter().filter(|entry| *entry != id).cloned().collect()
}

/// Ids back-to-front, the order a host without z-index support paints in.
pub fn paint_order(order: &[String]) -> impl Iterator<Item = &str> {
    order.iter().rev().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn focus_sequence_reorders_and_reindexes() {
        let order = bring_to_front(&[], "w1");
        assert_eq!(order, ids(&["w1"]));
        assert_eq!(z_index_for(&order, "w1"), 1000);

        let order = bring_to_front(&order, "w2");
        assert_eq!(order, ids(&["w2", "w1"]));
        assert_eq!(z_index_for(&order, "w2"), 1000);
        assert_eq!(z_index_for(&order, "w1"), 999);

        let order = bring_to_front(&order, "w1");
        assert_eq!(order, ids(&["w1", "w2"]));
    }

    #[test]
    fn unstacked_ids_paint_at_zero() {
        let order = ids(&["a", "b"]);
        assert_eq!(z_index_for(&order, "c"), 0);
        assert_eq!(z_index_for(&[], "a"), 0);
    }

    #[test]
    fn stack_never_holds_duplicates() {
        let script = [
            ("front", "a"),
            ("front", "b"),
            ("front", "a"),
            ("remove", "c"),
            ("front", "c"),
            ("front", "b"),
            ("remove", "a"),
            ("front", "a"),
            ("front", "a"),
        ];
        let mut order = Vec::new();
        for (op, id) in script {
            order = match op {
                "front" => bring_to_front(&order, id),
                _ => remove_from_order(&order, id),
            };
            let mut sorted = order.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), order.len(), "duplicate after {op} {id}: {order:?}");
        }
        assert_eq!(order, ids(&["a", "b", "c"]));
    }

    #[test]
    fn z_index_decreases_with_position() {
        let order = ids(&["d", "c", "b", "a"]);
        for pair in order.windows(2) {
            assert!(z_index_for(&order, &pair[0]) > z_index_for(&order, &pair[1]));
        }
    }

    #[test]
    fn repeated_focus_is_idempotent() {
        let order = ids(&["x", "y", "z"]);
        let once = bring_to_front(&order, "z");
        let twice = bring_to_front(&once, "z");
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_is_a_noop_for_absent_ids() {
        let order = ids(&["x", "y"]);
        assert_eq!(remove_from_order(&order, "q"), order);
        assert_eq!(remove_from_order(&order, "x"), ids(&["y"]));
    }

    #[test]
    fn paint_order_is_back_to_front() {
        let order = ids(&["top", "mid", "bottom"]);
        assert_eq!(paint_order(&order).collect::<Vec<_>>(), ["bottom", "mid", "top"]);
    }
}
