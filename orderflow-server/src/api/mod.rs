//! REST API
//!
//! Each module exposes `router()`; [`build_router`] merges them and
//! [`build_app`] adds the middleware stack, the static page fallback and
//! the state.

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::middleware::logging_middleware;

pub mod auth;
pub mod business;
pub mod employees;
pub mod health;
pub mod invitations;
pub mod kitchen;
pub mod menus;
pub mod orders;
pub mod stats;
pub mod tables;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v4 request ids
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(auth::router())
        // Tenant administration
        .merge(business::router())
        .merge(employees::router())
        .merge(invitations::router())
        // Catalogue and floor
        .merge(menus::router())
        .merge(tables::router())
        // Service
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(stats::router())
}

/// Fully configured application: routes, static pages, middleware, state
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let static_pages = ServeDir::new(&state.config.static_dir);

    build_router()
        .fallback_service(static_pages)
        // JWT authentication, injects CurrentUser (innermost)
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // Request id: set on the way in, copied to the response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}
