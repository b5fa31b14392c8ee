use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use usersvc_core::model::{UserChanges, UserRecord};
use usersvc_core::store::{ItemStore, StoreError, StoreResult};

/// In-process item store. Each conditional write holds the shard lock for its
/// key through the entry API, so check-and-write is atomic per item.
pub struct MemoryItemStore {
    table: String,
    items: DashMap<String, UserRecord>,
}

impl MemoryItemStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn put_if_absent(&self, record: UserRecord) -> StoreResult<()> {
        match self.items.entry(record.user_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::PreconditionFailed),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.items.get(user_id).map(|r| r.value().clone()))
    }

    async fn scan_up_to(&self, limit: usize) -> StoreResult<Vec<UserRecord>> {
        Ok(self
            .items
            .iter()
            .take(limit)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn update_if_exists(
        &self,
        user_id: &str,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<UserRecord> {
        let mut item = self
            .items
            .get_mut(user_id)
            .ok_or(StoreError::PreconditionFailed)?;
        item.apply(changes, now);
        Ok(item.clone())
    }

    async fn delete_if_exists(&self, user_id: &str) -> StoreResult<()> {
        self.items
            .remove(user_id)
            .map(|_| ())
            .ok_or(StoreError::PreconditionFailed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn changes(name: &str) -> UserChanges {
        UserChanges {
            email: format!("{name}@example.com"),
            name: name.into(),
            age: None,
        }
    }

    #[tokio::test]
    async fn put_if_absent_rejects_existing_id() {
        let store = MemoryItemStore::new("users");
        let rec = UserRecord::new(changes("a"), Utc::now());
        store.put_if_absent(rec.clone()).await.unwrap();
        assert_eq!(
            store.put_if_absent(rec).await,
            Err(StoreError::PreconditionFailed)
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_require_existence() {
        let store = MemoryItemStore::new("users");
        assert_eq!(
            store.update_if_exists("missing", changes("a"), Utc::now()).await,
            Err(StoreError::PreconditionFailed)
        );
        assert_eq!(
            store.delete_if_exists("missing").await,
            Err(StoreError::PreconditionFailed)
        );
    }

    #[tokio::test]
    async fn update_returns_all_new_attributes() {
        let store = MemoryItemStore::new("users");
        let rec = UserRecord::new(changes("a"), Utc::now());
        store.put_if_absent(rec.clone()).await.unwrap();

        let updated = store
            .update_if_exists(&rec.user_id, changes("b"), Utc::now())
            .await
            .unwrap();
        assert_eq!(updated.name, "b");
        assert_eq!(updated.created_at, rec.created_at);
        assert!(updated.updated_at >= rec.updated_at);
        assert_eq!(store.get_by_id(&rec.user_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn scan_is_capped() {
        let store = MemoryItemStore::new("users");
        for i in 0..5 {
            let rec = UserRecord::new(changes(&format!("u{i}")), Utc::now());
            store.put_if_absent(rec).await.unwrap();
        }
        assert_eq!(store.scan_up_to(3).await.unwrap().len(), 3);
        assert_eq!(store.scan_up_to(10).await.unwrap().len(), 5);
        assert!(store.scan_up_to(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_item() {
        let store = MemoryItemStore::new("users");
        let rec = UserRecord::new(changes("a"), Utc::now());
        store.put_if_absent(rec.clone()).await.unwrap();
        store.delete_if_exists(&rec.user_id).await.unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get_by_id(&rec.user_id).await.unwrap(), None);
    }
}
