//! Request-handling services.

pub mod users;

pub use users::UserService;
