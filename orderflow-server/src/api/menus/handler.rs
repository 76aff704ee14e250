//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ErrorCode;
use shared::models::{
    Menu, MenuCreate, MenuItem, MenuItemCreate, MenuItemUpdate, MenuUpdate, MenuWithItems,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{menu, menu_item};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    pub active: Option<bool>,
}

async fn find_menu(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<Menu> {
    menu::find_by_id(state.pool(), &user.business_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))
}

// ── Menus ───────────────────────────────────────────────────────────

/// GET /api/menus?active=true
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<Vec<Menu>>> {
    let menus = menu::list(state.pool(), &user.business_id, query.active).await?;
    Ok(Json(menus))
}

/// GET /api/menus/{id} - menu with its items
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuWithItems>> {
    let menu = find_menu(&state, &user, &id).await?;
    let items = menu_item::list_by_menu(state.pool(), &user.business_id, &id).await?;
    Ok(Json(MenuWithItems { menu, items }))
}

/// POST /api/menus
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created = menu::create(state.pool(), &user.business_id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::MenuNotFound, ErrorCode::MenuNameExists))?;
    Ok(Json(created))
}

/// PUT /api/menus/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let updated = menu::update(state.pool(), &user.business_id, &id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::MenuNotFound, ErrorCode::MenuNameExists))?;
    Ok(Json(updated))
}

/// DELETE /api/menus/{id} - removes the menu's items as well
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    menu::delete(state.pool(), &user.business_id, &id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::MenuNotFound, ErrorCode::AlreadyExists))?;
    tracing::info!(menu_id = %id, "Menu deleted");
    Ok(Json(true))
}

// ── Menu items ──────────────────────────────────────────────────────

/// GET /api/menus/{id}/items
pub async fn list_items(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    find_menu(&state, &user, &id).await?;
    let items = menu_item::list_by_menu(state.pool(), &user.business_id, &id).await?;
    Ok(Json(items))
}

/// POST /api/menus/{id}/items
pub async fn create_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_price(payload.price)?;

    let menu = find_menu(&state, &user, &id).await?;
    let created = menu_item::create(state.pool(), &user.business_id, &menu.id, &payload).await?;
    Ok(Json(created))
}

/// GET /api/menu-items/{id}
pub async fn get_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.pool(), &user.business_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    Ok(Json(item))
}

/// PUT /api/menu-items/{id}
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    let updated = menu_item::update(state.pool(), &user.business_id, &id, &payload)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::MenuItemNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(updated))
}

/// DELETE /api/menu-items/{id}
pub async fn delete_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    menu_item::delete(state.pool(), &user.business_id, &id)
        .await
        .map_err(|e| e.into_app_error(ErrorCode::MenuItemNotFound, ErrorCode::AlreadyExists))?;
    Ok(Json(true))
}
