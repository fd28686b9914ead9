//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (origin must be a local address)
//!     → auth.rs (static bearer token)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Two independent gates in a fixed order: network origin, then credential
//! - Fail closed: a missing or unparseable address is denied

pub mod access_control;
pub mod auth;

pub use access_control::{AccessGate, AllowList, Decision};
pub use auth::BearerAuth;
