//! HTTP middleware stack for the mock API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Request ID (add unique ID to each request)
//! 3. Bearer gate (reject unauthenticated mutations)

pub mod auth;
pub mod request_id;

pub use auth::{require_bearer, requires_bearer};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
