//! Storage backends implementing `usersvc_core::ItemStore`.
//!
//! `DynamoItemStore` is the production backend; `MemoryItemStore` serves local
//! runs and tests.

pub mod dynamo_store;
pub mod memory_store;

pub use dynamo_store::DynamoItemStore;
pub use memory_store::MemoryItemStore;
