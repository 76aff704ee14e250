//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::models::{Business, Employee, EmployeeRole};

use crate::auth::{CurrentUser, hash_password, permissions, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, business, employee};
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_email, validate_optional_text,
    validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub business_name: String,
    /// Login email of the first manager; also the business contact email
    pub email: String,
    pub password: String,
    /// Manager's display name
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Token plus who it belongs to and where the browser should go
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub employee: Employee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    pub home: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub employee: Employee,
    pub business: Business,
    pub home: &'static str,
    pub permissions: &'static [&'static str],
}

/// POST /api/auth/register - create a business and its first manager
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&req.business_name, "business_name", MAX_NAME_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    let email = normalize_email(&req.email)?;
    validate_password(&req.password, state.config.min_password_len)?;

    let hashed = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let mut tx = state.pool().begin().await.map_err(RepoError::from)?;

    if business::email_taken(&mut tx, &email).await? {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).with_detail("email", email));
    }

    let created = business::create(
        &mut tx,
        req.business_name.trim(),
        &email,
        req.phone.as_deref(),
        req.address.as_deref(),
    )
    .await
    .map_err(registration_conflict)?;

    let manager = employee::create(
        &mut tx,
        &created.id,
        req.name.trim(),
        &email,
        &hashed,
        EmployeeRole::Manager,
    )
    .await
    .map_err(registration_conflict)?;

    tx.commit().await.map_err(RepoError::from)?;

    security_log!(
        "INFO",
        "business_registered",
        business_id = created.id.clone(),
        user_id = manager.id.clone()
    );

    let token = state.get_jwt_service().generate_token(&manager)?;
    Ok(Json(AuthResponse {
        token,
        home: manager.role.home_page(),
        employee: manager,
        business: Some(created),
    }))
}

/// A concurrent registration can still win the unique index
fn registration_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
        other => other.into(),
    }
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&req.email).map_err(|_| AppError::invalid_credentials())?;

    let Some(creds) = employee::find_credentials_by_email(state.pool(), &email).await? else {
        security_log!("WARN", "login_failed", reason = "unknown_email");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(&req.password, &creds.hashed_password) {
        security_log!(
            "WARN",
            "login_failed",
            reason = "bad_password",
            user_id = creds.employee.id.clone()
        );
        return Err(AppError::invalid_credentials());
    }

    let employee = creds.employee;
    if !employee.is_active {
        security_log!("WARN", "login_disabled", user_id = employee.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = state.get_jwt_service().generate_token(&employee)?;
    tracing::info!(user_id = %employee.id, role = %employee.role, "Employee logged in");

    Ok(Json(AuthResponse {
        token,
        home: employee.role.home_page(),
        employee,
        business: None,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<MeResponse>> {
    let employee = employee::find_by_id(state.pool(), &user.business_id, &user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    let business = business::find_by_id(state.pool(), &user.business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    Ok(Json(MeResponse {
        home: employee.role.home_page(),
        permissions: permissions::permissions_for(employee.role),
        employee,
        business,
    }))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<bool>> {
    let creds = employee::find_credentials_by_id(state.pool(), &user.business_id, &user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    if !verify_password(&req.current_password, &creds.hashed_password) {
        security_log!("WARN", "password_change_failed", user_id = user.id.clone());
        return Err(AppError::invalid_credentials());
    }

    validate_password(&req.new_password, state.config.min_password_len)?;
    let hashed = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    employee::update_password(state.pool(), &user.business_id, &user.id, &hashed).await?;
    security_log!("INFO", "password_changed", user_id = user.id.clone());

    Ok(Json(true))
}
