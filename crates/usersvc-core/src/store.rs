//! Item store contract.
//!
//! Each operation is one conditional call against the backend. The outcome is
//! tri-state: `Ok`, `Err(PreconditionFailed)` when the existence guard did not
//! hold, or `Err(Backend)` for anything else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{UserChanges, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("the conditional request failed")]
    PreconditionFailed,
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Key-value backend with per-item atomic conditional writes.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Table (collection) this store operates on.
    fn table(&self) -> &str;

    /// Write `record` only if no item with its id exists.
    async fn put_if_absent(&self, record: UserRecord) -> StoreResult<()>;

    async fn get_by_id(&self, user_id: &str) -> StoreResult<Option<UserRecord>>;

    /// Unfiltered scan returning at most `limit` items in backend order.
    async fn scan_up_to(&self, limit: usize) -> StoreResult<Vec<UserRecord>>;

    /// Apply `changes` only if the item exists; returns the item as stored afterwards.
    async fn update_if_exists(
        &self,
        user_id: &str,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<UserRecord>;

    async fn delete_if_exists(&self, user_id: &str) -> StoreResult<()>;
}
