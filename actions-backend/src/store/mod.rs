//! Persistence for action items.
//!
//! The HTTP layer never touches storage directly; it goes through [`ItemStore`].
//! A store assigns ids and creation timestamps, and is responsible for
//! serializing concurrent writes to the same record.

mod memory;
mod sqlite;

use action_utils::{ActionItem, Category, ItemId};
use chrono::Utc;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("invalid stored item: {0}")]
    InvalidData(String),
}

/// A validated item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub text: String,
    pub category: Category,
}

impl NewItem {
    fn into_item(self) -> ActionItem {
        ActionItem {
            id: ItemId(uuid::Uuid::new_v4().to_string()),
            text: self.text,
            category: self.category,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Validated partial update. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub completed: Option<bool>,
}

impl ItemPatch {
    pub fn apply(self, item: &mut ActionItem) {
        if let Some(text) = self.text {
            item.text = text;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
    }
}

pub trait ItemStore: Send + Sync + 'static {
    /// All items, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<ActionItem>, StoreError>> + Send;

    fn insert(&self, item: NewItem) -> impl Future<Output = Result<ActionItem, StoreError>> + Send;

    /// Returns `Ok(None)` when no item has this id.
    fn update(
        &self,
        id: &ItemId,
        patch: ItemPatch,
    ) -> impl Future<Output = Result<Option<ActionItem>, StoreError>> + Send;

    /// Returns whether an item was actually removed.
    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_leaves_unspecified_fields() {
        let mut item = NewItem {
            text: "draft".to_string(),
            category: Category::Email,
        }
        .into_item();
        let before = item.clone();

        ItemPatch {
            completed: Some(true),
            ..ItemPatch::default()
        }
        .apply(&mut item);

        assert!(item.completed);
        assert_eq!(item.text, before.text);
        assert_eq!(item.category, before.category);
        assert_eq!(item.created_at, before.created_at);
        assert_eq!(item.id, before.id);
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let new = NewItem {
            text: "x".to_string(),
            category: Category::Remind,
        };
        let a = new.clone().into_item();
        let b = new.into_item();
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }
}
