//! Business API Handlers

use axum::{Json, extract::State};
use shared::ErrorCode;
use shared::models::{Business, BusinessUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::business;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/business - the caller's business
pub async fn get(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Business>> {
    let business = business::find_by_id(state.pool(), &user.business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;
    Ok(Json(business))
}

/// PUT /api/business
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BusinessUpdate>,
) -> AppResult<Json<Business>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let business = business::update(state.pool(), &user.business_id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::BusinessNotFound, ErrorCode::AlreadyExists))?;

    tracing::info!(business_id = %business.id, "Business updated");
    Ok(Json(business))
}
