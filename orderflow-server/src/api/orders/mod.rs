//! Order API
//!
//! Orders live under `/api/orders`; single lines are addressed through
//! `/api/order-items/{id}`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", order_routes())
        .nest("/api/order-items", item_routes())
}

fn order_routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(permissions::ORDERS_READ)));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/items", post(handler::add_items))
        .layer(middleware::from_fn(require_permission(permissions::ORDERS_WRITE)));

    let status_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(
            permissions::ORDERS_STATUS,
        )));

    read_routes.merge(write_routes).merge(status_routes)
}

fn item_routes() -> Router<ServerState> {
    let write_routes = Router::new()
        .route(
            "/{id}",
            put(handler::update_item).delete(handler::delete_item),
        )
        .layer(middleware::from_fn(require_permission(permissions::ORDERS_WRITE)));

    let status_routes = Router::new()
        .route("/{id}/status", put(handler::update_item_status))
        .layer(middleware::from_fn(require_permission(
            permissions::ORDERS_STATUS,
        )));

    write_routes.merge(status_routes)
}
