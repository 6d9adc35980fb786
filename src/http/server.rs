//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum app with a single dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Read the body within the configured limit
//! - Hand every request to the route table
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_id, MakeRequestUuid, RouteRequest, X_REQUEST_ID};
use crate::http::response::ApiResponse;
use crate::observability::metrics;
use crate::routing::{Dispatched, Router, CATCH_ALL, UNMATCHED};

/// Errors from binding or running the listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind a TCP listener on `address`.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub max_body_size: usize,
}

/// HTTP server for the route table.
pub struct HttpServer {
    app: axum::Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: AppConfig, routes: Router) -> Self {
        let state = AppState {
            router: Arc::new(routes),
            max_body_size: config.security.max_body_size,
        };
        Self {
            app: Self::build_app(&config, state),
        }
    }

    /// Build the axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &AppConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The axum app, for driving requests in-process.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// True if reading the body stopped at the size limit, as opposed to a
/// broken or aborted body stream.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = std::error::Error::source(e);
    }
    false
}

/// True if no specific route answered: the catch-all ran, or nothing matched.
fn fell_through(route: &str) -> bool {
    route == CATCH_ALL || route == UNMATCHED
}

/// Collects the request into a `RouteRequest` and dispatches it.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();

    let bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let response = if is_length_limit(&e) {
                tracing::warn!(
                    request_id = %request_id,
                    limit = state.max_body_size,
                    "Request body over limit"
                );
                ApiResponse::payload_too_large()
            } else {
                tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
                ApiResponse::invalid_body()
            };
            metrics::record_request(method.as_str(), UNMATCHED, response.status().as_u16(), start_time);
            return response.into_response();
        }
    };

    let route_request = RouteRequest::new(parts.method, parts.uri.path())
        .with_query(parts.uri.query())
        .with_body(&bytes);

    let Dispatched { route, response } = state.router.dispatch(route_request);
    let status = response.status();

    if fell_through(route) {
        tracing::warn!(
            request_id = %request_id,
            route = %route,
            path = %parts.uri.path(),
            status = %status,
            "No route matched"
        );
    } else {
        tracing::debug!(request_id = %request_id, route = %route, status = %status, "Dispatched");
    }

    metrics::record_request(method.as_str(), route, status.as_u16(), start_time);
    response.into_response()
}
