//! Top-level facade crate for the user service.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use usersvc_core::*;
}

pub mod gateway {
    pub use usersvc_gateway::*;
}
