//! User record operations: one store call per request, outcomes classified
//! into `UserSvcError`.

use std::sync::Arc;

use chrono::Utc;

use usersvc_core::error::{Result, UserSvcError};
use usersvc_core::model::{UserInput, UserRecord};
use usersvc_core::store::{ItemStore, StoreError};

use crate::config::ListSection;

pub struct UserService {
    store: Arc<dyn ItemStore>,
    list: ListSection,
}

impl UserService {
    pub fn new(store: Arc<dyn ItemStore>, list: ListSection) -> Self {
        Self { store, list }
    }

    /// Validate, assign a fresh id and timestamps, then write if absent.
    ///
    /// An id collision is not a client error here: it surfaces as a store
    /// failure (500), same as any other write error.
    pub async fn create(&self, input: UserInput) -> Result<UserRecord> {
        let changes = input.into_changes()?;
        let record = UserRecord::new(changes, Utc::now());

        match self.store.put_if_absent(record.clone()).await {
            Ok(()) => Ok(record),
            Err(StoreError::PreconditionFailed) => Err(UserSvcError::Store(format!(
                "user {} already exists",
                record.user_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, user_id: &str) -> Result<UserRecord> {
        self.store
            .get_by_id(user_id)
            .await?
            .ok_or(UserSvcError::NotFound)
    }

    /// Scan up to `limit` records (configured default when `None`).
    /// Any positive limit is passed through; the backend caps what it returns.
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<UserRecord>> {
        let limit = limit.unwrap_or(self.list.default_limit);
        if limit == 0 {
            return Err(UserSvcError::Validation("limit must be at least 1".into()));
        }
        Ok(self.store.scan_up_to(limit).await?)
    }

    /// Full replacement of email/name/age on an existing record.
    pub async fn update(&self, user_id: &str, input: UserInput) -> Result<UserRecord> {
        let changes = input.into_changes()?;
        Ok(self
            .store
            .update_if_exists(user_id, changes, Utc::now())
            .await?)
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        Ok(self.store.delete_if_exists(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use usersvc_core::error::ClientCode;

    use super::*;
    use crate::infra::MemoryItemStore;

    fn service() -> UserService {
        UserService::new(
            Arc::new(MemoryItemStore::new("users")),
            ListSection::default(),
        )
    }

    fn input(email: &str, name: &str, age: Option<u32>) -> UserInput {
        UserInput {
            email: email.into(),
            name: name.into(),
            age,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let created = svc.create(input("a@b.com", "A", Some(30))).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let fetched = svc.get(&created.user_id).await.unwrap();
        assert_eq!(fetched, created);
        // reads are idempotent
        assert_eq!(svc.get(&created.user_id).await.unwrap(), fetched);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_store() {
        let store = Arc::new(MemoryItemStore::new("users"));
        let svc = UserService::new(store.clone(), ListSection::default());
        let err = svc.create(input("nope", "A", None)).await.unwrap_err();
        assert_eq!(err.client_code(), ClientCode::Validation);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_moves_updated_at_forward() {
        let svc = service();
        let created = svc.create(input("a@b.com", "A", Some(30))).await.unwrap();
        let updated = svc
            .update(&created.user_id, input("c@d.com", "C", None))
            .await
            .unwrap();

        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.email, "c@d.com");
        assert_eq!(updated.name, "C");
        assert_eq!(updated.age, None);
    }

    #[tokio::test]
    async fn deleted_record_is_gone_for_every_operation() {
        let svc = service();
        let created = svc.create(input("a@b.com", "A", None)).await.unwrap();
        svc.delete(&created.user_id).await.unwrap();

        let id = created.user_id.as_str();
        assert!(matches!(svc.get(id).await, Err(UserSvcError::NotFound)));
        assert!(matches!(
            svc.update(id, input("a@b.com", "A", None)).await,
            Err(UserSvcError::NotFound)
        ));
        assert!(matches!(svc.delete(id).await, Err(UserSvcError::NotFound)));
    }

    #[tokio::test]
    async fn list_respects_limit_bounds() {
        let svc = service();
        for i in 0..12 {
            svc.create(input(&format!("u{i}@b.com"), "U", None))
                .await
                .unwrap();
        }
        assert_eq!(svc.list(None).await.unwrap().len(), 10);
        assert_eq!(svc.list(Some(3)).await.unwrap().len(), 3);
        assert_eq!(svc.list(Some(50)).await.unwrap().len(), 12);
        assert_eq!(svc.list(Some(5000)).await.unwrap().len(), 12);
        assert!(matches!(
            svc.list(Some(0)).await,
            Err(UserSvcError::Validation(_))
        ));
    }
}
