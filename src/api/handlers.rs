use chrono::SecondsFormat;
use serde_json::json;

use crate::api::data::{
    lookup, AUTHORS, MISSING_POST, MY_PROFILE, POSTS, PROFILES, PROFILE_V1, PROFILE_V2,
    UNKNOWN_AUTHOR,
};
use crate::http::{ApiResponse, RouteRequest};

/// Rendered in place of a search query that was not supplied at all.
pub const MISSING_QUERY: &str = "undefined";

pub fn root(_req: &RouteRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "message": "hello from routing article" }))
}

pub fn my_profile(_req: &RouteRequest) -> ApiResponse {
    ApiResponse::ok(json!(MY_PROFILE))
}

/// Echoes the request body back. Nothing is validated or stored; a body
/// that was missing or not JSON echoes as `null`.
pub fn update_profile(req: &RouteRequest) -> ApiResponse {
    ApiResponse::ok(json!({
        "message": "Profile updated successfully",
        "data": req.body,
    }))
}

pub fn profile_by_id(req: &RouteRequest) -> ApiResponse {
    let id = req.param("id").unwrap_or_default();

    match lookup(PROFILES, id) {
        Some(profile) => ApiResponse::ok(json!({
            "message": format!("Profile fetched for user ID: {id}"),
            "data": profile,
        })),
        None => ApiResponse::not_found(json!({ "message": "User not found" })),
    }
}

/// `?query=` is echoed verbatim (so an empty value stays empty); a missing
/// parameter renders as [`MISSING_QUERY`].
pub fn search(req: &RouteRequest) -> ApiResponse {
    let query = req.query("query").unwrap_or(MISSING_QUERY);
    ApiResponse::ok(json!({ "message": format!("You searched for: {query}") }))
}

/// Always answers 200. Unknown user ids get [`UNKNOWN_AUTHOR`] and unknown
/// post ids get [`MISSING_POST`]; the two lookups are independent.
pub fn user_post(req: &RouteRequest) -> ApiResponse {
    let user = req
        .param("userId")
        .and_then(|id| lookup(AUTHORS, id))
        .unwrap_or(&UNKNOWN_AUTHOR);
    let post = req
        .param("postId")
        .and_then(|id| lookup(POSTS, id))
        .unwrap_or(&MISSING_POST);

    ApiResponse::ok(json!({
        "user": user,
        "post": post,
        "timestamp": req.received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub fn profile_v1(_req: &RouteRequest) -> ApiResponse {
    ApiResponse::ok(json!(PROFILE_V1))
}

pub fn profile_v2(_req: &RouteRequest) -> ApiResponse {
    ApiResponse::ok(json!(PROFILE_V2))
}

/// Catch-all handler listing the given endpoints.
pub fn route_not_found(
    endpoints: Vec<String>,
) -> impl Fn(&RouteRequest) -> ApiResponse + Send + Sync + 'static {
    move |_: &RouteRequest| {
        ApiResponse::not_found(json!({
            "error": "Route not found",
            "availableEndpoints": endpoints,
        }))
    }
}
