//! Menu Repository

use super::{RepoError, RepoResult};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, business_id, name, description, is_active, created_at, updated_at";

pub async fn create(pool: &SqlitePool, business_id: &str, data: &MenuCreate) -> RepoResult<Menu> {
    let now = shared::util::now_millis();
    let menu = Menu {
        id: shared::util::new_id(),
        business_id: business_id.to_string(),
        name: data.name.clone(),
        description: data.description.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO menus (id, business_id, name, description, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&menu.id)
    .bind(&menu.business_id)
    .bind(&menu.name)
    .bind(&menu.description)
    .bind(menu.created_at)
    .bind(menu.updated_at)
    .execute(pool)
    .await?;

    Ok(menu)
}

/// List menus by name, optionally filtered by `is_active`
pub async fn list(
    pool: &SqlitePool,
    business_id: &str,
    active: Option<bool>,
) -> RepoResult<Vec<Menu>> {
    let rows = sqlx::query_as::<_, Menu>(&format!(
        "SELECT {COLUMNS} FROM menus WHERE business_id = ?1 AND (?2 IS NULL OR is_active = ?2) ORDER BY name"
    ))
    .bind(business_id)
    .bind(active)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<Menu>> {
    let row = sqlx::query_as::<_, Menu>(&format!(
        "SELECT {COLUMNS} FROM menus WHERE business_id = ? AND id = ?"
    ))
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
    data: &MenuUpdate,
) -> RepoResult<Menu> {
    let rows = sqlx::query(
        r#"
        UPDATE menus SET
            name = COALESCE(?1, name),
            description = COALESCE(?2, description),
            is_active = COALESCE(?3, is_active),
            updated_at = ?4
        WHERE business_id = ?5 AND id = ?6
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active)
    .bind(shared::util::now_millis())
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu {id}")));
    }

    find_by_id(pool, business_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("menu {id}")))
}

/// Delete a menu; its items go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, business_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menus WHERE business_id = ? AND id = ?")
        .bind(business_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu {id}")));
    }
    Ok(())
}
