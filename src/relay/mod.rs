//! Relay subsystem: the pass-through from caller to camera API.
//!
//! # Data Flow
//! ```text
//! POST /login/ | /cameras/ | /recordings/
//!     → request.rs (typed body, presence checks)
//!     → upstream.rs (one GET, PersonalAccessToken header)
//!     → http/response.rs (status + body copied back)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod upstream;

pub use error::{RelayError, RelayResult, UpstreamError};
pub use upstream::{Endpoint, UpstreamClient, UpstreamResponse};
