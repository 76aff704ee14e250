//! Kitchen queue API

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/kitchen",
        Router::new()
            .route("/queue", get(handler::queue))
            .layer(middleware::from_fn(require_permission(permissions::ORDERS_READ))),
    )
}
