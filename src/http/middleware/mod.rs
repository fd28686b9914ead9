//! Request-gating middleware applied to the whole router.

pub mod access_control;

pub use access_control::{local_access_middleware, LocalAccessState, LOCAL_ACCESS_ONLY};
