//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query, body)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (method filter + segment-wise path match)
//!     → handler(RouteRequest) → ApiResponse
//!
//! Route registration (at startup):
//!     "/api/profile/:id"
//!     → matcher.rs compiles literal / :param segments
//!     → appended to the route table, order preserved
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First match wins, in registration order
//! - The catch-all `*` is a route like any other, registered last
//! - At most one handler runs per request

pub mod matcher;
pub mod router;

pub use matcher::{CATCH_ALL, MethodFilter, PathParams, PathPattern, PatternError};
pub use router::{Dispatched, Handler, Route, RouteMatch, Router, UNMATCHED};
