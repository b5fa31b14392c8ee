//! User service core: record model, error taxonomy, and the item store contract.
//!
//! This crate defines the data shapes and storage capability shared by the
//! gateway and its tests. It carries no HTTP or runtime dependencies so the
//! store contract can be implemented by any backend.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `UserSvcError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod store;

/// Shared result type.
pub use error::{Result, UserSvcError};
pub use model::{UserChanges, UserInput, UserRecord};
pub use store::{ItemStore, StoreError, StoreResult};
