//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, OrderDetail};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::dining_table::TableDelete;
use crate::db::repository::order::OrderFilter;
use crate::db::repository::{dining_table, order};
use crate::utils::{AppError, AppResult};

fn validate_positive(value: Option<i32>, field: &str) -> AppResult<()> {
    if let Some(v) = value
        && v <= 0
    {
        return Err(AppError::validation(format!("{field} must be greater than zero"))
            .with_detail("field", field));
    }
    Ok(())
}

async fn find(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<DiningTable> {
    dining_table::find_by_id(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))
}

/// GET /api/tables - ordered by number
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::list(state.pool(), &user.business_id).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    Ok(Json(find(&state, &user, &id).await?))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_positive(Some(payload.number), "number")?;
    validate_positive(payload.capacity, "capacity")?;

    let table = dining_table::create(state.pool(), &user.business_id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::TableNotFound, ErrorCode::TableNumberExists))?;
    Ok(Json(table))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_positive(payload.number, "number")?;
    validate_positive(payload.capacity, "capacity")?;

    let table = dining_table::update(state.pool(), &user.business_id, &id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::TableNotFound, ErrorCode::TableNumberExists))?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id}
///
/// Refused while any order references the table; deactivate it instead.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let outcome = dining_table::delete(state.pool(), &user.business_id, &id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::TableNotFound, ErrorCode::AlreadyExists))?;

    match outcome {
        TableDelete::Deleted => {
            tracing::info!(table_id = %id, "Table deleted");
            Ok(Json(true))
        }
        TableDelete::HasOpenOrders => {
            Err(AppError::new(ErrorCode::TableHasOpenOrders).with_detail("table_id", id))
        }
        TableDelete::HasOrderHistory => {
            Err(AppError::new(ErrorCode::TableHasOrderHistory).with_detail("table_id", id))
        }
    }
}

/// GET /api/tables/{id}/orders - open orders on the table, newest first
pub async fn open_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let table = find(&state, &user, &id).await?;
    let orders = order::list(
        state.pool(),
        &user.business_id,
        &OrderFilter {
            table_id: Some(table.id),
            open: Some(true),
            ..Default::default()
        },
    )
    .await?;
    Ok(Json(orders))
}
