//! Kitchen Queue

use super::RepoResult;
use shared::models::{KitchenTicket, OrderStatus};
use sqlx::SqlitePool;

/// SQL `IN` list of the statuses matching `keep`
fn status_list(keep: impl Fn(&OrderStatus) -> bool) -> String {
    OrderStatus::ALL
        .iter()
        .filter(|&s| keep(s))
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines with kitchen work left on orders that are still open,
/// oldest first
pub async fn queue(pool: &SqlitePool, business_id: &str, now: i64) -> RepoResult<Vec<KitchenTicket>> {
    let sql = format!(
        r#"
        SELECT oi.id AS item_id, oi.order_id, t.number AS table_number, oi.name, oi.quantity,
               oi.status, oi.notes, oi.created_at,
               (?1 - oi.created_at) / 1000 AS age_seconds
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        JOIN dining_tables t ON t.id = o.table_id
        WHERE o.business_id = ?2
          AND oi.status IN ({kitchen})
          AND o.status IN ({open})
        ORDER BY oi.created_at, oi.rowid
        "#,
        kitchen = status_list(OrderStatus::is_kitchen_work),
        open = status_list(OrderStatus::is_open),
    );
    let rows = sqlx::query_as::<_, KitchenTicket>(&sql)
        .bind(now)
        .bind(business_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::{self, OrderLine};
    use crate::db::repository::{fixtures, order_item};
    use crate::db::test_pool;
    use shared::models::{EmployeeRole, OrderStatus};

    fn line(name: &str) -> OrderLine {
        OrderLine {
            menu_item_id: format!("mi-{name}"),
            name: name.into(),
            price: 100,
            quantity: 1,
            notes: None,
        }
    }

    #[test]
    fn test_status_lists() {
        assert_eq!(
            status_list(OrderStatus::is_kitchen_work),
            "'pending', 'in_progress'"
        );
        assert_eq!(
            status_list(OrderStatus::is_open),
            "'pending', 'in_progress', 'ready'"
        );
    }

    #[tokio::test]
    async fn test_queue_contents() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let other = fixtures::business(&pool, "other@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 9).await;

        let open = order::create(
            &pool,
            &biz.id,
            &table.id,
            &waiter.id,
            None,
            &[line("Soup"), line("Steak"), line("Cake")],
        )
        .await
        .unwrap();
        let closed = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Tea")])
            .await
            .unwrap();
        order::set_status(&pool, &biz.id, &closed.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let items = order_item::list_by_order(&pool, &open.id).await.unwrap();
        order_item::set_status(&pool, &items[1].id, OrderStatus::InProgress)
            .await
            .unwrap();
        order_item::set_status(&pool, &items[2].id, OrderStatus::Ready)
            .await
            .unwrap();

        let now = shared::util::now_millis() + 5_000;
        let tickets = queue(&pool, &biz.id, now).await.unwrap();
        let names: Vec<&str> = tickets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Steak"]);
        assert!(tickets.iter().all(|t| t.table_number == 9));
        assert!(tickets.iter().all(|t| t.order_id == open.id));
        assert!(tickets[0].age_seconds >= 5);

        assert!(queue(&pool, &other.id, now).await.unwrap().is_empty());
    }
}
