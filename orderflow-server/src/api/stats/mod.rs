//! Statistics API

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/stats",
        Router::new()
            .route("/summary", get(handler::summary))
            .route("/daily", get(handler::daily))
            .layer(middleware::from_fn(require_permission(permissions::REPORTS_VIEW))),
    )
}
