//! Order Repository
//!
//! Orders are written together with their lines inside one transaction.
//! Line name and price come from the caller as a snapshot of the menu item.

use super::{RepoError, RepoResult, order_item};
use serde::Deserialize;
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Line to insert, already resolved against the menu
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// List filter (`GET /api/orders` query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_id: Option<String>,
    /// Only pending / in_progress / ready
    pub open: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    #[sqlx(flatten)]
    order: Order,
    table_number: i32,
}

const SELECT_WITH_TABLE: &str = "SELECT o.id, o.business_id, o.table_id, o.employee_id, o.status, o.notes, o.created_at, o.updated_at, t.number AS table_number FROM orders o JOIN dining_tables t ON t.id = o.table_id";

/// Open an order with its initial lines
pub async fn create(
    pool: &SqlitePool,
    business_id: &str,
    table_id: &str,
    employee_id: &str,
    notes: Option<&str>,
    lines: &[OrderLine],
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let order = Order {
        id: shared::util::new_id(),
        business_id: business_id.to_string(),
        table_id: table_id.to_string(),
        employee_id: employee_id.to_string(),
        status: OrderStatus::Pending,
        notes: notes.map(str::to_string),
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO orders (id, business_id, table_id, employee_id, status, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.business_id)
    .bind(&order.table_id)
    .bind(&order.employee_id)
    .bind(order.status)
    .bind(&order.notes)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *tx)
    .await?;

    for line in lines {
        order_item::insert(&mut tx, &order.id, line, now).await?;
    }

    tx.commit().await?;
    Ok(order)
}

/// Append lines to an order and bump its `updated_at`
pub async fn add_items(
    pool: &SqlitePool,
    business_id: &str,
    order_id: &str,
    lines: &[OrderLine],
) -> RepoResult<Vec<OrderItem>> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    touch(&mut tx, business_id, order_id, now).await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        items.push(order_item::insert(&mut tx, order_id, line, now).await?);
    }

    tx.commit().await?;
    Ok(items)
}

async fn touch(
    conn: &mut SqliteConnection,
    business_id: &str,
    order_id: &str,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET updated_at = ? WHERE business_id = ? AND id = ?")
        .bind(now)
        .bind(business_id)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {order_id}")));
    }
    Ok(())
}

pub async fn find_by_id(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(
        "SELECT id, business_id, table_id, employee_id, status, notes, created_at, updated_at FROM orders WHERE business_id = ? AND id = ?",
    )
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Order with table number, lines and total
pub async fn find_detail(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<OrderDetail>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_WITH_TABLE} WHERE o.business_id = ? AND o.id = ?"
    ))
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let items = order_item::list_by_order(pool, &row.order.id).await?;
    Ok(Some(OrderDetail::new(row.order, row.table_number, items)))
}

/// Newest first
pub async fn list(
    pool: &SqlitePool,
    business_id: &str,
    filter: &OrderFilter,
) -> RepoResult<Vec<OrderDetail>> {
    let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = filter.offset.unwrap_or(0).max(0);

    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        r#"{SELECT_WITH_TABLE}
        WHERE o.business_id = ?1
          AND (?2 IS NULL OR o.status = ?2)
          AND (?3 IS NULL OR o.table_id = ?3)
          AND (?4 = 0 OR o.status IN ('pending', 'in_progress', 'ready'))
        ORDER BY o.created_at DESC, o.id
        LIMIT ?5 OFFSET ?6"#
    ))
    .bind(business_id)
    .bind(filter.status)
    .bind(&filter.table_id)
    .bind(filter.open.unwrap_or(false))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let items = order_item::list_by_order(pool, &row.order.id).await?;
        orders.push(OrderDetail::new(row.order, row.table_number, items));
    }
    Ok(orders)
}

/// Write the order status
///
/// `delivered` and `cancelled` are pushed down to every line that is not
/// already delivered or cancelled.
pub async fn set_status(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
    status: OrderStatus,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = ? WHERE business_id = ? AND id = ?",
    )
    .bind(status)
    .bind(now)
    .bind(business_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {id}")));
    }

    if !status.is_open() {
        sqlx::query(
            "UPDATE order_items SET status = ?, updated_at = ? WHERE order_id = ? AND status IN ('pending', 'in_progress', 'ready')",
        )
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures;
    use crate::db::test_pool;
    use shared::models::EmployeeRole;

    fn line(name: &str, price: i64, quantity: i32) -> OrderLine {
        OrderLine {
            menu_item_id: format!("mi-{name}"),
            name: name.into(),
            price,
            quantity,
            notes: None,
        }
    }

    struct Seed {
        pool: SqlitePool,
        business_id: String,
        employee_id: String,
        table_id: String,
    }

    async fn seed() -> Seed {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 3).await;
        Seed {
            pool,
            business_id: biz.id,
            employee_id: waiter.id,
            table_id: table.id,
        }
    }

    #[tokio::test]
    async fn test_create_and_detail() {
        let s = seed().await;
        let order = create(
            &s.pool,
            &s.business_id,
            &s.table_id,
            &s.employee_id,
            Some("window seat"),
            &[line("Soup", 650, 2), line("Bread", 200, 1)],
        )
        .await
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let detail = find_detail(&s.pool, &s.business_id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.table_number, 3);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.total, 2 * 650 + 200);
        assert!(
            detail
                .items
                .iter()
                .all(|i| i.status == OrderStatus::Pending)
        );
    }

    #[tokio::test]
    async fn test_terminal_status_cascades_to_open_lines() {
        let s = seed().await;
        let order = create(
            &s.pool,
            &s.business_id,
            &s.table_id,
            &s.employee_id,
            None,
            &[line("Soup", 650, 1), line("Tea", 250, 1)],
        )
        .await
        .unwrap();
        let detail = find_detail(&s.pool, &s.business_id, &order.id)
            .await
            .unwrap()
            .unwrap();
        order_item::set_status(&s.pool, &detail.items[1].id, OrderStatus::Cancelled)
            .await
            .unwrap();

        set_status(&s.pool, &s.business_id, &order.id, OrderStatus::Delivered)
            .await
            .unwrap();

        let detail = find_detail(&s.pool, &s.business_id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.order.status, OrderStatus::Delivered);
        let by_name = |n: &str| detail.items.iter().find(|i| i.name == n).unwrap().status;
        assert_eq!(by_name("Soup"), OrderStatus::Delivered);
        // already cancelled lines stay cancelled
        assert_eq!(by_name("Tea"), OrderStatus::Cancelled);
        assert_eq!(detail.total, 650);
    }

    #[tokio::test]
    async fn test_non_terminal_status_leaves_lines() {
        let s = seed().await;
        let order = create(
            &s.pool,
            &s.business_id,
            &s.table_id,
            &s.employee_id,
            None,
            &[line("Soup", 650, 1)],
        )
        .await
        .unwrap();

        set_status(&s.pool, &s.business_id, &order.id, OrderStatus::Ready)
            .await
            .unwrap();
        let detail = find_detail(&s.pool, &s.business_id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.order.status, OrderStatus::Ready);
        assert_eq!(detail.items[0].status, OrderStatus::Pending);

        assert!(matches!(
            set_status(&s.pool, "other-biz", &order.id, OrderStatus::Ready).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let s = seed().await;
        let first = create(&s.pool, &s.business_id, &s.table_id, &s.employee_id, None, &[])
            .await
            .unwrap();
        let second = create(&s.pool, &s.business_id, &s.table_id, &s.employee_id, None, &[])
            .await
            .unwrap();
        set_status(&s.pool, &s.business_id, &first.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let all = list(&s.pool, &s.business_id, &OrderFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let open = list(
            &s.pool,
            &s.business_id,
            &OrderFilter {
                open: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].order.id, second.id);

        let cancelled = list(
            &s.pool,
            &s.business_id,
            &OrderFilter {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].order.id, first.id);

        let paged = list(
            &s.pool,
            &s.business_id,
            &OrderFilter {
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(paged.len(), 1);

        assert!(
            list(&s.pool, "other-biz", &OrderFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_add_items_to_existing_order() {
        let s = seed().await;
        let order = create(
            &s.pool,
            &s.business_id,
            &s.table_id,
            &s.employee_id,
            None,
            &[line("Soup", 650, 1)],
        )
        .await
        .unwrap();

        let added = add_items(&s.pool, &s.business_id, &order.id, &[line("Pie", 400, 2)])
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].order_id, order.id);

        let detail = find_detail(&s.pool, &s.business_id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.total, 650 + 800);

        assert!(matches!(
            add_items(&s.pool, "other-biz", &order.id, &[line("Pie", 400, 1)]).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
