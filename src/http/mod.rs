//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, tracing, timeout)
//!     → request.rs (body + query → RouteRequest)
//!     → routing::Router (pick route, run handler)
//!     → response.rs (ApiResponse → JSON response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, RouteRequest, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{bind, AppState, HttpServer, ServerError};
