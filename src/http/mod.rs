//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, middleware)
//!     → request.rs (request ID)
//!     → relay::handlers (validate, dispatch upstream)
//!     → response.rs (status + body back to the caller)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
