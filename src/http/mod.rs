//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware/access_control.rs (local-origin gate)
//!     → api (bearer auth, handlers)
//!     → response.rs (success / error bodies)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, ErrorResponse, SuccessResponse};
pub use server::{AppState, HttpServer};
