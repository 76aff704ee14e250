//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::ErrorCode;
use shared::models::{
    Order, OrderAddItems, OrderCreate, OrderDetail, OrderItem, OrderItemInput, OrderItemUpdate,
    StatusUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order::{OrderFilter, OrderLine};
use crate::db::repository::order_item::ScopedOrderItem;
use crate::db::repository::{dining_table, menu_item, order, order_item};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_quantity};
use crate::utils::{AppError, AppResult};

/// Resolve requested lines against the menu, snapshotting name and price
async fn resolve_lines(
    state: &ServerState,
    business_id: &str,
    inputs: &[OrderItemInput],
) -> AppResult<Vec<OrderLine>> {
    if inputs.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let mut lines = Vec::with_capacity(inputs.len());
    for input in inputs {
        validate_quantity(input.quantity)?;
        validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;

        let item = menu_item::find_by_id(state.pool(), business_id, &input.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::MenuItemNotFound)
                    .with_detail("menu_item_id", input.menu_item_id.clone())
            })?;
        if !item.is_available {
            return Err(AppError::new(ErrorCode::MenuItemUnavailable)
                .with_detail("menu_item_id", item.id)
                .with_detail("name", item.name));
        }

        lines.push(OrderLine {
            menu_item_id: item.id,
            name: item.name,
            price: item.price,
            quantity: input.quantity,
            notes: input.notes.clone(),
        });
    }
    Ok(lines)
}

async fn find_order(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<Order> {
    order::find_by_id(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

async fn load_detail(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<OrderDetail> {
    order::find_detail(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Item lookup for edits; lines of closed orders are frozen
async fn find_editable_item(
    state: &ServerState,
    user: &CurrentUser,
    id: &str,
) -> AppResult<ScopedOrderItem> {
    let scoped = order_item::find_scoped(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
    if !scoped.order_status.is_open() {
        return Err(AppError::new(ErrorCode::OrderClosed)
            .with_detail("order_id", scoped.item.order_id.clone())
            .with_detail("status", scoped.order_status.as_str()));
    }
    Ok(scoped)
}

// ── Orders ──────────────────────────────────────────────────────────

/// GET /api/orders?status=&table_id=&open=&limit=&offset=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = order::list(state.pool(), &user.business_id, &filter).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(load_detail(&state, &user, &id).await?))
}

/// POST /api/orders - open an order on an active table
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let table = dining_table::find_by_id(state.pool(), &user.business_id, &payload.table_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    if !table.is_active {
        return Err(AppError::new(ErrorCode::TableInactive).with_detail("number", table.number));
    }

    let lines = resolve_lines(&state, &user.business_id, &payload.items).await?;
    let created = order::create(
        state.pool(),
        &user.business_id,
        &table.id,
        &user.id,
        payload.notes.as_deref(),
        &lines,
    )
    .await?;

    tracing::info!(
        order_id = %created.id,
        table = table.number,
        lines = lines.len(),
        employee_id = %user.id,
        "Order opened"
    );
    Ok(Json(load_detail(&state, &user, &created.id).await?))
}

/// POST /api/orders/{id}/items - append lines to an open order
pub async fn add_items(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderAddItems>,
) -> AppResult<Json<OrderDetail>> {
    let existing = find_order(&state, &user, &id).await?;
    if !existing.status.is_open() {
        return Err(AppError::new(ErrorCode::OrderClosed)
            .with_detail("status", existing.status.as_str()));
    }

    let lines = resolve_lines(&state, &user.business_id, &payload.items).await?;
    order::add_items(state.pool(), &user.business_id, &existing.id, &lines)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::OrderNotFound, ErrorCode::AlreadyExists))?;

    Ok(Json(load_detail(&state, &user, &existing.id).await?))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderDetail>> {
    order::set_status(state.pool(), &user.business_id, &id, payload.status)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::OrderNotFound, ErrorCode::AlreadyExists))?;

    tracing::info!(order_id = %id, status = %payload.status, employee_id = %user.id, "Order status changed");
    Ok(Json(load_detail(&state, &user, &id).await?))
}

// ── Order items ─────────────────────────────────────────────────────

/// PUT /api/order-items/{id} - quantity / notes
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let scoped = find_editable_item(&state, &user, &id).await?;
    let item = order_item::update(state.pool(), &scoped.item.id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::OrderItemNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(item))
}

/// PUT /api/order-items/{id}/status
pub async fn update_item_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderItem>> {
    let scoped = order_item::find_scoped(state.pool(), &user.business_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;

    let item = order_item::set_status(state.pool(), &scoped.item.id, payload.status)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::OrderItemNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(item))
}

/// DELETE /api/order-items/{id}
pub async fn delete_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let scoped = find_editable_item(&state, &user, &id).await?;
    order_item::delete(state.pool(), &scoped.item.id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::OrderItemNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(true))
}
