use action_utils::{ActionItem, ItemId};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{ItemPatch, ItemStore, NewItem, StoreError};

/// Keeps items in insertion order for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<IndexMap<ItemId, ActionItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MemoryStore {
    async fn list(&self) -> Result<Vec<ActionItem>, StoreError> {
        let items = self.items.read().await;
        // Later inserts win ties on equal timestamps.
        let mut listed: Vec<ActionItem> = items.values().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn insert(&self, item: NewItem) -> Result<ActionItem, StoreError> {
        let item = item.into_item();
        self.items
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<ActionItem>, StoreError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(item);
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, StoreError> {
        Ok(self.items.write().await.shift_remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_utils::Category;

    fn new_item(text: &str) -> NewItem {
        NewItem {
            text: text.to_string(),
            category: Category::Remind,
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(new_item("first")).await.unwrap();
        let second = store.insert(new_item("second")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![second, first]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = MemoryStore::new();
        let patch = ItemPatch {
            completed: Some(true),
            ..ItemPatch::default()
        };
        assert_eq!(store.update(&ItemId::from("nope"), patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        let item = store.insert(new_item("gone soon")).await.unwrap();

        assert!(store.delete(&item.id).await.unwrap());
        assert!(!store.delete(&item.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
