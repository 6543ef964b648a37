use std::path::Path;
use std::sync::Mutex;

use action_utils::{ActionItem, Category, ItemId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::{ItemPatch, ItemStore, NewItem, StoreError};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS action_items (
    id TEXT PRIMARY KEY NOT NULL,
    text TEXT NOT NULL CHECK (length(trim(text)) > 0),
    category TEXT NOT NULL DEFAULT 'remind'
        CHECK (category IN ('remind', 'email', 'invite', 'prioritize')),
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)";

const ITEM_SELECT_SQL: &str = "SELECT id, text, category, completed, created_at FROM action_items";

type RawItem = (String, String, String, bool, String);

/// SQLite-backed store. All access goes through one connection, so writes
/// are serialized by the mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn)
    }

    fn list_sync(&self) -> Result<Vec<ActionItem>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("{ITEM_SELECT_SQL} ORDER BY created_at DESC, rowid DESC"))?;
            let rows = stmt
                .query_map([], read_raw)?
                .collect::<Result<Vec<RawItem>, _>>()?;
            rows.into_iter().map(parse_raw).collect()
        })
    }

    fn insert_sync(&self, item: NewItem) -> Result<ActionItem, StoreError> {
        let item = item.into_item();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO action_items (id, text, category, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    item.id.as_str(),
                    item.text,
                    item.category.as_str(),
                    item.completed,
                    format_timestamp(&item.created_at),
                ],
            )?;
            Ok(())
        })?;
        Ok(item)
    }

    fn update_sync(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<ActionItem>, StoreError> {
        self.with_conn(|conn| {
            let raw = conn
                .query_row(
                    &format!("{ITEM_SELECT_SQL} WHERE id = ?1"),
                    [id.as_str()],
                    read_raw,
                )
                .optional()?;
            let Some(raw) = raw else {
                return Ok(None);
            };
            let mut item = parse_raw(raw)?;
            patch.apply(&mut item);
            conn.execute(
                "UPDATE action_items SET text = ?2, category = ?3, completed = ?4 WHERE id = ?1",
                params![
                    item.id.as_str(),
                    item.text,
                    item.category.as_str(),
                    item.completed
                ],
            )?;
            Ok(Some(item))
        })
    }

    fn delete_sync(&self, id: &ItemId) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM action_items WHERE id = ?1", [id.as_str()])?;
            Ok(removed > 0)
        })
    }
}

impl ItemStore for SqliteStore {
    fn list(&self) -> impl Future<Output = Result<Vec<ActionItem>, StoreError>> + Send {
        std::future::ready(self.list_sync())
    }

    fn insert(&self, item: NewItem) -> impl Future<Output = Result<ActionItem, StoreError>> + Send {
        std::future::ready(self.insert_sync(item))
    }

    fn update(
        &self,
        id: &ItemId,
        patch: ItemPatch,
    ) -> impl Future<Output = Result<Option<ActionItem>, StoreError>> + Send {
        std::future::ready(self.update_sync(id, patch))
    }

    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<bool, StoreError>> + Send {
        std::future::ready(self.delete_sync(id))
    }
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn parse_raw((id, text, category, completed, created_at): RawItem) -> Result<ActionItem, StoreError> {
    let category: Category = category
        .parse()
        .map_err(|e| StoreError::InvalidData(format!("item {id}: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StoreError::InvalidData(format!("item {id}: bad created_at: {e}")))?
        .with_timezone(&Utc);
    Ok(ActionItem {
        id: ItemId(id),
        text,
        category,
        completed,
        created_at,
    })
}

// Fixed-width so that ORDER BY on the text column is chronological.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(text: &str, category: Category) -> NewItem {
        NewItem {
            text: text.to_string(),
            category,
        }
    }

    #[tokio::test]
    async fn test_items_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.sqlite3");

        let created = {
            let store = SqliteStore::open(&path).unwrap();
            store
                .insert(new_item("invite the team", Category::Invite))
                .await
                .unwrap()
        };

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let store = SqliteStore::open_in_memory().unwrap();
        let item = store
            .insert(new_item("email landlord", Category::Email))
            .await
            .unwrap();

        let patch = ItemPatch {
            text: Some("email landlord about rent".to_string()),
            completed: Some(true),
            ..ItemPatch::default()
        };
        let updated = store.update(&item.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.text, "email landlord about rent");
        assert_eq!(updated.category, Category::Email);
        assert!(updated.completed);
        assert_eq!(updated.created_at, item.created_at);

        assert_eq!(store.list().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let missing = ItemId::from("missing");
        assert_eq!(
            store.update(&missing, ItemPatch::default()).await.unwrap(),
            None
        );
        assert!(!store.delete(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert(new_item("a", Category::Remind)).await.unwrap();
        let b = store.insert(new_item("b", Category::Remind)).await.unwrap();
        let c = store.insert(new_item("c", Category::Remind)).await.unwrap();

        let ids: Vec<ItemId> = store.list().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }
}
