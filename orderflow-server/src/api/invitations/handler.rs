//! Invitation API Handlers
//!
//! A manager creates an invitation and passes the token on; the invitee
//! redeems it at `/api/invitations/accept` and becomes an employee with
//! the invited role.

use axum::{
    Json,
    extract::{Path, State},
};
use rand::Rng;
use rand::distributions::Alphanumeric;
use shared::ErrorCode;
use shared::models::{Invitation, InvitationAccept, InvitationCreate};

use crate::api::auth::AuthResponse;
use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, business, employee, invitation};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, normalize_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const TOKEN_LEN: usize = 40;

/// Random URL-safe invitation token
fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// GET /api/invitations
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Invitation>>> {
    let invitations = invitation::list(state.pool(), &user.business_id).await?;
    Ok(Json(invitations))
}

/// POST /api/invitations
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<InvitationCreate>,
) -> AppResult<Json<Invitation>> {
    let email = normalize_email(&payload.email)?;

    {
        let mut conn = state.pool().acquire().await.map_err(RepoError::from)?;
        if business::email_taken(&mut conn, &email).await? {
            return Err(AppError::new(ErrorCode::EmployeeEmailExists).with_detail("email", email));
        }
    }

    let expires_at = shared::util::now_millis() + state.config.invitation_ttl_millis();
    let created = invitation::create(
        state.pool(),
        &user.business_id,
        &email,
        payload.role,
        &generate_token(),
        &user.id,
        expires_at,
    )
    .await
    .map_err(|e| e.into_app_error(ErrorCode::InvitationNotFound, ErrorCode::AlreadyExists))?;

    security_log!(
        "INFO",
        "invitation_created",
        user_id = user.id.clone(),
        invitation_id = created.id.clone(),
        role = created.role.as_str()
    );
    Ok(Json(created))
}

/// DELETE /api/invitations/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    invitation::delete(state.pool(), &user.business_id, &id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::InvitationNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(true))
}

/// POST /api/invitations/accept (public)
pub async fn accept(
    State(state): State<ServerState>,
    Json(payload): Json<InvitationAccept>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_password(&payload.password, state.config.min_password_len)?;
    let hashed = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let now = shared::util::now_millis();
    // Take the write lock up front so concurrent accepts queue on
    // busy_timeout instead of failing the lock upgrade
    let mut tx = state
        .pool()
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    let Some(inv) = invitation::find_by_token(&mut tx, payload.token.trim()).await? else {
        security_log!("WARN", "invitation_unknown_token");
        return Err(AppError::new(ErrorCode::InvitationNotFound));
    };
    if inv.is_accepted() {
        return Err(AppError::new(ErrorCode::InvitationAlreadyUsed));
    }
    if inv.is_expired(now) {
        return Err(AppError::new(ErrorCode::InvitationExpired));
    }
    if business::email_taken(&mut tx, &inv.email).await? {
        return Err(AppError::new(ErrorCode::EmployeeEmailExists));
    }

    let created = employee::create(
        &mut tx,
        &inv.business_id,
        payload.name.trim(),
        &inv.email,
        &hashed,
        inv.role,
    )
    .await
    .map_err(|e| e.into_app_error(ErrorCode::EmployeeNotFound, ErrorCode::EmployeeEmailExists))?;

    if !invitation::mark_accepted(&mut tx, &inv.id, now).await? {
        return Err(AppError::new(ErrorCode::InvitationAlreadyUsed));
    }

    tx.commit().await.map_err(RepoError::from)?;

    security_log!(
        "INFO",
        "invitation_accepted",
        invitation_id = inv.id.clone(),
        user_id = created.id.clone(),
        business_id = created.business_id.clone()
    );

    let token = state.get_jwt_service().generate_token(&created)?;
    Ok(Json(AuthResponse {
        token,
        home: created.role.home_page(),
        employee: created,
        business: None,
    }))
}
