//! Dining Table API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(permissions::TABLES_READ)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            permissions::TABLES_MANAGE,
        )));

    // Tab view: open orders on one table
    let order_routes = Router::new()
        .route("/{id}/orders", get(handler::open_orders))
        .layer(middleware::from_fn(require_permission(permissions::ORDERS_READ)));

    read_routes.merge(manage_routes).merge(order_routes)
}
