use std::cmp::Ordering;

use crate::{ActionItem, Category};

/// Order in which items are shown: open items first, then prioritized ones,
/// then newest first.
pub fn display_cmp(a: &ActionItem, b: &ActionItem) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| {
            let a_priority = a.category == Category::Prioritize;
            let b_priority = b.category == Category::Prioritize;
            b_priority.cmp(&a_priority)
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

pub fn display_order(items: &[ActionItem]) -> Vec<ActionItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(display_cmp);
    sorted
}

pub fn pending_count(items: &[ActionItem]) -> usize {
    items.iter().filter(|item| !item.completed).count()
}
