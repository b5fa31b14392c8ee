//! HTTP handlers for the user record routes.

pub mod error;
pub mod users;

pub use error::ApiError;
