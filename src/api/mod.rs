//! Hero profile API.
//!
//! # Data Flow
//! ```text
//! router() registers, in order:
//!     static routes      → "/", "/api/profile/me", POST "/api/profile"
//!     dynamic route      → "/api/profile/:id"
//!     query route        → "/api/search?query="
//!     nested route       → "/api/profile/me/:userId/posts/:postId"
//!     versioned routes   → "/api/v1/profile/me", "/api/v2/profile/me"
//!     catch-all          → "*" (any method), lists everything above
//! ```
//!
//! # Design Decisions
//! - `/api/profile/me` precedes `/api/profile/:id` so "me" is never an id
//! - The catch-all's endpoint list is taken from the table it terminates

pub mod data;
pub mod handlers;

use crate::routing::{PatternError, Router, CATCH_ALL};
use self::handlers::*;

/// Build the complete route table.
pub fn router() -> Result<Router, PatternError> {
    let router = Router::new()
        .get("/", root)?
        .get("/api/profile/me", my_profile)?
        .post("/api/profile", update_profile)?
        .get("/api/profile/:id", profile_by_id)?
        .get("/api/search", search)?
        .with_usage("/api/search?query=name")
        .get("/api/profile/me/:userId/posts/:postId", user_post)?
        .get("/api/v1/profile/me", profile_v1)?
        .get("/api/v2/profile/me", profile_v2)?;

    let endpoints = router.endpoints();
    router.all(CATCH_ALL, route_not_found(endpoints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RouteRequest;
    use axum::http::{Method, StatusCode};

    #[test]
    fn test_table_order() {
        let router = router().unwrap();
        let templates: Vec<&str> = router.routes().map(|r| r.template()).collect();
        assert_eq!(
            templates,
            vec![
                "/",
                "/api/profile/me",
                "/api/profile",
                "/api/profile/:id",
                "/api/search",
                "/api/profile/me/:userId/posts/:postId",
                "/api/v1/profile/me",
                "/api/v2/profile/me",
                "*",
            ]
        );
    }

    #[test]
    fn test_me_is_not_an_id() {
        let router = router().unwrap();
        let dispatched = router.dispatch(RouteRequest::new(Method::GET, "/api/profile/me"));
        assert_eq!(dispatched.route, "/api/profile/me");
        assert_eq!(dispatched.response.status(), StatusCode::OK);
        assert_eq!(dispatched.response.body()["name"], "Steve Rogers");
    }

    #[test]
    fn test_catch_all_lists_registered_endpoints() {
        let router = router().unwrap();
        let dispatched = router.dispatch(RouteRequest::new(Method::PUT, "/foo/bar"));
        assert_eq!(dispatched.route, "*");
        assert_eq!(dispatched.response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            dispatched.response.body()["availableEndpoints"],
            serde_json::json!([
                "/",
                "/api/profile/me",
                "/api/profile",
                "/api/profile/:id",
                "/api/search?query=name",
                "/api/profile/me/:userId/posts/:postId",
                "/api/v1/profile/me",
                "/api/v2/profile/me",
            ])
        );
    }

    #[test]
    fn test_get_on_post_only_route_falls_through() {
        let router = router().unwrap();
        let dispatched = router.dispatch(RouteRequest::new(Method::GET, "/api/profile"));
        assert_eq!(dispatched.route, "*");
        assert_eq!(dispatched.response.status(), StatusCode::NOT_FOUND);
    }
}
