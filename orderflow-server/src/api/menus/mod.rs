//! Menu and Menu Item API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/menus", menu_routes())
        .nest("/api/menu-items", item_routes())
}

fn menu_routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items", get(handler::list_items))
        .layer(middleware::from_fn(require_permission(permissions::MENUS_READ)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/items", post(handler::create_item))
        .layer(middleware::from_fn(require_permission(
            permissions::MENUS_MANAGE,
        )));

    read_routes.merge(manage_routes)
}

fn item_routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/{id}", get(handler::get_item))
        .layer(middleware::from_fn(require_permission(permissions::MENUS_READ)));

    let manage_routes = Router::new()
        .route("/{id}", put(handler::update_item).delete(handler::delete_item))
        .layer(middleware::from_fn(require_permission(
            permissions::MENUS_MANAGE,
        )));

    read_routes.merge(manage_routes)
}
