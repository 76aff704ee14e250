//! Invitation API

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/invitations", routes())
}

fn routes() -> Router<ServerState> {
    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            permissions::EMPLOYEES_MANAGE,
        )));

    // Public: the invitee has no account yet
    let public_routes = Router::new().route("/accept", post(handler::accept));

    manage_routes.merge(public_routes)
}
