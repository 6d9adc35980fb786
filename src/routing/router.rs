//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Look up the first route whose method filter and path pattern match
//! - Invoke exactly one handler per request
//! - Report the registered endpoint templates
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan over routes, first match wins
//! - Patterns compile at registration, so bad templates fail at startup
//! - Explicit not-found response when nothing matches, even without a catch-all

use std::fmt;

use axum::http::Method;
use serde_json::json;

use crate::http::{ApiResponse, RouteRequest};
use crate::routing::matcher::{MethodFilter, PathParams, PathPattern, PatternError};

/// Route label reported when no registered route matched.
pub const UNMATCHED: &str = "none";

/// A route handler: builds a response from a matched request.
pub type Handler = Box<dyn Fn(&RouteRequest) -> ApiResponse + Send + Sync>;

/// A registered route.
pub struct Route {
    method: MethodFilter,
    pattern: PathPattern,
    usage: Option<String>,
    handler: Handler,
}

impl Route {
    pub fn method(&self) -> MethodFilter {
        self.method
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// How the route is advertised in endpoint listings.
    pub fn usage(&self) -> &str {
        self.usage.as_deref().unwrap_or_else(|| self.pattern.template())
    }

    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_catch_all()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.template())
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// The route selected for a request, with its bound parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Outcome of dispatching one request.
#[derive(Debug)]
pub struct Dispatched<'a> {
    /// Template of the route that answered, or [`UNMATCHED`].
    pub route: &'a str,
    pub response: ApiResponse,
}

/// Ordered route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Routes are tried in the order they are added.
    pub fn route<F>(
        mut self,
        method: MethodFilter,
        pattern: &str,
        handler: F,
    ) -> Result<Self, PatternError>
    where
        F: Fn(&RouteRequest) -> ApiResponse + Send + Sync + 'static,
    {
        let pattern = PathPattern::parse(pattern)?;
        let shadowed_by = self
            .routes
            .iter()
            .find(|r| r.is_catch_all() && r.method == MethodFilter::All);
        if let Some(catch_all) = shadowed_by {
            tracing::warn!(
                pattern = %pattern.template(),
                catch_all = %catch_all.template(),
                "Route registered after a catch-all is unreachable"
            );
        }
        self.routes.push(Route {
            method,
            pattern,
            usage: None,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn get<F>(self, pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&RouteRequest) -> ApiResponse + Send + Sync + 'static,
    {
        self.route(MethodFilter::Get, pattern, handler)
    }

    pub fn post<F>(self, pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&RouteRequest) -> ApiResponse + Send + Sync + 'static,
    {
        self.route(MethodFilter::Post, pattern, handler)
    }

    pub fn all<F>(self, pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&RouteRequest) -> ApiResponse + Send + Sync + 'static,
    {
        self.route(MethodFilter::All, pattern, handler)
    }

    /// Attach a usage hint (e.g. "/api/search?query=name") to the most
    /// recently registered route.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        if let Some(route) = self.routes.last_mut() {
            route.usage = Some(usage.into());
        }
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Usage strings of every non-catch-all route, in registration order,
    /// without duplicates.
    pub fn endpoints(&self) -> Vec<String> {
        let mut endpoints: Vec<String> = Vec::new();
        for route in self.routes.iter().filter(|r| !r.is_catch_all()) {
            let usage = route.usage();
            if !endpoints.iter().any(|e| e == usage) {
                endpoints.push(usage.to_string());
            }
        }
        endpoints
    }

    /// Find the first route accepting `method` whose pattern matches `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|route| route.method.accepts(method))
            .find_map(|route| {
                route
                    .pattern
                    .matches(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    /// Run the handler of the first matching route.
    pub fn dispatch(&self, mut request: RouteRequest) -> Dispatched<'_> {
        match self.match_route(&request.method, &request.path) {
            Some(RouteMatch { route, params }) => {
                request.params = params;
                Dispatched {
                    route: route.template(),
                    response: (route.handler)(&request),
                }
            }
            None => Dispatched {
                route: UNMATCHED,
                response: ApiResponse::not_found(json!({ "error": "Route not found" })),
            },
        }
    }
}
