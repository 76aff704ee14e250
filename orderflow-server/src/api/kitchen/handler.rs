//! Kitchen queue handler

use axum::{Json, extract::State};
use shared::models::KitchenTicket;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::kitchen;
use crate::utils::AppResult;

/// GET /api/kitchen/queue - lines still to prepare, oldest first
pub async fn queue(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<KitchenTicket>>> {
    let tickets =
        kitchen::queue(state.pool(), &user.business_id, shared::util::now_millis()).await?;
    Ok(Json(tickets))
}
