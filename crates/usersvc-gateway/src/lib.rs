//! User service gateway library entry.
//!
//! This crate wires config, the item store, request metrics, and the HTTP
//! handlers into a router. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod infra;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
