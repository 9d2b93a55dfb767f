//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay handlers produce:
//!     → logging.rs (structured log events, request ID in the span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! Tokens are never logged.

pub mod logging;
pub mod metrics;
