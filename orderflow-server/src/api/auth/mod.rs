//! Registration, login and session API

mod handler;

pub use handler::AuthResponse;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        // Authenticated
        .route("/me", get(handler::me))
        .route("/change-password", post(handler::change_password))
}
