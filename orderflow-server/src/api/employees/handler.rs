//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ErrorCode;
use shared::models::{Employee, EmployeeRole, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/employees
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = employee::list(state.pool(), &user.business_id).await?;
    Ok(Json(employees))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let found = find(&state, &user, &id).await?;
    Ok(Json(found))
}

async fn find(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<Employee> {
    employee::find_by_id(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

/// PUT /api/employees/{id} - name, role, active flag
///
/// The last active manager cannot be demoted or deactivated (`LastManager`).
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let demotes = payload.role.is_some_and(|r| r != EmployeeRole::Manager);
    let deactivates = payload.is_active == Some(false);

    if id == user.id && (demotes || deactivates) {
        security_log!("WARN", "self_modification_denied", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }

    let target = find(&state, &user, &id).await?;

    let updated = employee::update(state.pool(), &user.business_id, &id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::EmployeeNotFound, ErrorCode::EmployeeEmailExists))?;

    if updated.role != target.role || updated.is_active != target.is_active {
        security_log!(
            "INFO",
            "employee_access_changed",
            user_id = user.id.clone(),
            target_id = updated.id.clone(),
            role = updated.role.as_str(),
            is_active = updated.is_active
        );
    }

    Ok(Json(updated))
}

/// DELETE /api/employees/{id}
///
/// Employees who have taken orders are kept for history; deactivate them instead.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if id == user.id {
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }

    find(&state, &user, &id).await?;
    if employee::has_orders(state.pool(), &id).await? {
        return Err(AppError::conflict(
            "Employee has orders on record; deactivate the account instead",
        )
        .with_detail("employee_id", id));
    }

    employee::delete(state.pool(), &user.business_id, &id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::EmployeeNotFound, ErrorCode::AlreadyExists))?;

    security_log!(
        "INFO",
        "employee_deleted",
        user_id = user.id.clone(),
        target_id = id
    );
    Ok(Json(true))
}
