//! Order Item Repository
//!
//! Items carry no business ID of their own; tenant scoping goes through
//! the parent order.

use super::order::OrderLine;
use super::{RepoError, RepoResult};
use shared::models::{OrderItem, OrderItemUpdate, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str =
    "id, order_id, menu_item_id, name, quantity, price, status, notes, created_at, updated_at";

/// Item together with the status of its order
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScopedOrderItem {
    #[sqlx(flatten)]
    pub item: OrderItem,
    pub order_status: OrderStatus,
}

pub(super) async fn insert(
    conn: &mut SqliteConnection,
    order_id: &str,
    line: &OrderLine,
    now: i64,
) -> RepoResult<OrderItem> {
    let item = OrderItem {
        id: shared::util::new_id(),
        order_id: order_id.to_string(),
        menu_item_id: line.menu_item_id.clone(),
        name: line.name.clone(),
        quantity: line.quantity,
        price: line.price,
        status: OrderStatus::Pending,
        notes: line.notes.clone(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO order_items (id, order_id, menu_item_id, name, quantity, price, status, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&item.id)
    .bind(&item.order_id)
    .bind(&item.menu_item_id)
    .bind(&item.name)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.status)
    .bind(&item.notes)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(item)
}

/// Lines of one order, in the order they were added
pub async fn list_by_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {COLUMNS} FROM order_items WHERE order_id = ? ORDER BY created_at, rowid"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Look up an item through its order's business
pub async fn find_scoped(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<ScopedOrderItem>> {
    let row = sqlx::query_as::<_, ScopedOrderItem>(
        r#"
        SELECT oi.id, oi.order_id, oi.menu_item_id, oi.name, oi.quantity, oi.price,
               oi.status, oi.notes, oi.created_at, oi.updated_at,
               o.status AS order_status
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE o.business_id = ? AND oi.id = ?
        "#,
    )
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<OrderItem> {
    sqlx::query_as::<_, OrderItem>(&format!("SELECT {COLUMNS} FROM order_items WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("order item {id}")))
}

/// Change quantity and/or notes
pub async fn update(pool: &SqlitePool, id: &str, data: &OrderItemUpdate) -> RepoResult<OrderItem> {
    let rows = sqlx::query(
        r#"
        UPDATE order_items SET
            quantity = COALESCE(?1, quantity),
            notes = COALESCE(?2, notes),
            updated_at = ?3
        WHERE id = ?4
        "#,
    )
    .bind(data.quantity)
    .bind(&data.notes)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order item {id}")));
    }
    find_by_id(pool, id).await
}

pub async fn set_status(pool: &SqlitePool, id: &str, status: OrderStatus) -> RepoResult<OrderItem> {
    let rows = sqlx::query("UPDATE order_items SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order item {id}")));
    }
    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM order_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order item {id}")));
    }
    Ok(())
}
