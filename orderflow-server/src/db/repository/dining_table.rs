//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, business_id, number, capacity, is_active, created_at";

pub async fn create(
    pool: &SqlitePool,
    business_id: &str,
    data: &DiningTableCreate,
) -> RepoResult<DiningTable> {
    let table = DiningTable {
        id: shared::util::new_id(),
        business_id: business_id.to_string(),
        number: data.number,
        capacity: data.capacity.unwrap_or(4),
        is_active: true,
        created_at: shared::util::now_millis(),
    };

    sqlx::query(
        "INSERT INTO dining_tables (id, business_id, number, capacity, is_active, created_at) VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(&table.id)
    .bind(&table.business_id)
    .bind(table.number)
    .bind(table.capacity)
    .bind(table.created_at)
    .execute(pool)
    .await?;

    Ok(table)
}

pub async fn list(pool: &SqlitePool, business_id: &str) -> RepoResult<Vec<DiningTable>> {
    let rows = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_tables WHERE business_id = ? ORDER BY number"
    ))
    .bind(business_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<DiningTable>> {
    let row = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_tables WHERE business_id = ? AND id = ?"
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
    data: &DiningTableUpdate,
) -> RepoResult<DiningTable> {
    let rows = sqlx::query(
        r#"
        UPDATE dining_tables SET
            number = COALESCE(?1, number),
            capacity = COALESCE(?2, capacity),
            is_active = COALESCE(?3, is_active)
        WHERE business_id = ?4 AND id = ?5
        "#,
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.is_active)
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("table {id}")));
    }

    find_by_id(pool, business_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("table {id}")))
}

/// Outcome of [`delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDelete {
    Deleted,
    /// Orders on the table are still pending, in progress or ready
    HasOpenOrders,
    /// Only closed orders reference the table; they are kept for reporting
    HasOrderHistory,
}

/// Delete a table that no order references
///
/// The existence check and the delete are one statement, so an order
/// opened concurrently either blocks the delete or fails its foreign key.
pub async fn delete(pool: &SqlitePool, business_id: &str, id: &str) -> RepoResult<TableDelete> {
    let rows = sqlx::query(
        r#"
        DELETE FROM dining_tables
        WHERE business_id = ?1 AND id = ?2
          AND NOT EXISTS (SELECT 1 FROM orders WHERE table_id = ?2)
        "#,
    )
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() > 0 {
        return Ok(TableDelete::Deleted);
    }

    // Nothing deleted: tell a missing table from a referenced one
    let (exists, open): (bool, bool) = sqlx::query_as(
        r#"
        SELECT EXISTS(SELECT 1 FROM dining_tables WHERE business_id = ?1 AND id = ?2),
               EXISTS(SELECT 1 FROM orders WHERE table_id = ?2
                      AND status IN ('pending', 'in_progress', 'ready'))
        "#,
    )
    .bind(business_id)
    .bind(id)
    .fetch_one(pool)
    .await?;

    match (exists, open) {
        (false, _) => Err(RepoError::NotFound(format!("table {id}"))),
        (true, true) => Ok(TableDelete::HasOpenOrders),
        (true, false) => Ok(TableDelete::HasOrderHistory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures;
    use crate::db::test_pool;
    use shared::models::EmployeeRole;

    #[tokio::test]
    async fn test_create_defaults_and_order() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        fixtures::table(&pool, &biz.id, 5).await;
        let t = create(
            &pool,
            &biz.id,
            &DiningTableCreate {
                number: 2,
                capacity: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(t.capacity, 4);
        assert!(t.is_active);

        let numbers: Vec<i32> = list(&pool, &biz.id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.number)
            .collect();
        assert_eq!(numbers, vec![2, 5]);
    }

    #[tokio::test]
    async fn test_duplicate_number_is_duplicate() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        fixtures::table(&pool, &biz.id, 1).await;
        let t2 = fixtures::table(&pool, &biz.id, 2).await;

        let err = update(
            &pool,
            &biz.id,
            &t2.id,
            &DiningTableUpdate {
                number: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    async fn insert_order(pool: &SqlitePool, biz: &str, table: &str, employee: &str, status: &str) {
        sqlx::query(
            "INSERT INTO orders (id, business_id, table_id, employee_id, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 0, 0)",
        )
        .bind(shared::util::new_id())
        .bind(biz)
        .bind(table)
        .bind(employee)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn order_count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE table_id = ?")
            .bind(table)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_unused_table() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let table = fixtures::table(&pool, &biz.id, 1).await;

        assert_eq!(
            delete(&pool, &biz.id, &table.id).await.unwrap(),
            TableDelete::Deleted
        );
        assert!(find_by_id(&pool, &biz.id, &table.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, &biz.id, &table.id).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_keeps_open_orders() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 1).await;
        insert_order(&pool, &biz.id, &table.id, &waiter.id, "pending").await;

        assert_eq!(
            delete(&pool, &biz.id, &table.id).await.unwrap(),
            TableDelete::HasOpenOrders
        );
        assert!(find_by_id(&pool, &biz.id, &table.id).await.unwrap().is_some());
        assert_eq!(order_count(&pool, &table.id).await, 1);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_history() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 1).await;
        insert_order(&pool, &biz.id, &table.id, &waiter.id, "delivered").await;
        insert_order(&pool, &biz.id, &table.id, &waiter.id, "cancelled").await;

        assert_eq!(
            delete(&pool, &biz.id, &table.id).await.unwrap(),
            TableDelete::HasOrderHistory
        );
        assert_eq!(order_count(&pool, &table.id).await, 2);
    }

    #[tokio::test]
    async fn test_delete_is_tenant_scoped() {
        let pool = test_pool().await;
        let a = fixtures::business(&pool, "a@bistro.io").await;
        let b = fixtures::business(&pool, "b@bistro.io").await;
        let table = fixtures::table(&pool, &a.id, 1).await;

        assert!(matches!(
            delete(&pool, &b.id, &table.id).await,
            Err(RepoError::NotFound(_))
        ));
        assert!(find_by_id(&pool, &a.id, &table.id).await.unwrap().is_some());
    }
}
