//! Reporting queries
//!
//! Revenue counts only delivered orders and skips cancelled lines.

use super::RepoResult;
use shared::models::{DailyRevenue, StatsSummary, StatusCount, TopItem};
use shared::util::{DAY_MILLIS, day_start};
use sqlx::SqlitePool;
use std::collections::HashMap;

const TOP_ITEMS: i64 = 5;

/// `YYYY-MM-DD` for a UTC millisecond timestamp
fn format_day(ts: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Summary over `[from, to)`
pub async fn summary(
    pool: &SqlitePool,
    business_id: &str,
    from: i64,
    to: i64,
) -> RepoResult<StatsSummary> {
    let orders_by_status = sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM orders WHERE business_id = ? AND created_at >= ? AND created_at < ? GROUP BY status ORDER BY status",
    )
    .bind(business_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    let order_count = orders_by_status.iter().map(|s| s.count).sum();

    let (delivered, revenue): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(DISTINCT o.id),
               COALESCE(SUM(CASE WHEN oi.status != 'cancelled' THEN oi.quantity * oi.price END), 0)
        FROM orders o
        LEFT JOIN order_items oi ON oi.order_id = o.id
        WHERE o.business_id = ? AND o.status = 'delivered'
          AND o.created_at >= ? AND o.created_at < ?
        "#,
    )
    .bind(business_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let top_items = sqlx::query_as::<_, TopItem>(
        r#"
        SELECT oi.menu_item_id, MAX(oi.name) AS name,
               SUM(oi.quantity) AS quantity, SUM(oi.quantity * oi.price) AS revenue
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE o.business_id = ? AND o.created_at >= ? AND o.created_at < ?
          AND oi.status != 'cancelled' AND o.status != 'cancelled'
        GROUP BY oi.menu_item_id
        ORDER BY quantity DESC, name
        LIMIT ?
        "#,
    )
    .bind(business_id)
    .bind(from)
    .bind(to)
    .bind(TOP_ITEMS)
    .fetch_all(pool)
    .await?;

    Ok(StatsSummary {
        from,
        to,
        order_count,
        orders_by_status,
        revenue,
        average_order_value: if delivered > 0 { revenue / delivered } else { 0 },
        top_items,
    })
}

/// One entry per UTC day for the last `days` days (today included),
/// oldest first; days without orders are zero
pub async fn daily(
    pool: &SqlitePool,
    business_id: &str,
    days: i64,
    now: i64,
) -> RepoResult<Vec<DailyRevenue>> {
    let first_day = day_start(now) - (days - 1) * DAY_MILLIS;
    let end = day_start(now) + DAY_MILLIS;

    let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
        r#"
        SELECT (o.created_at / ?1) * ?1 AS day,
               COUNT(DISTINCT o.id),
               COALESCE(SUM(CASE WHEN o.status = 'delivered' AND oi.status != 'cancelled'
                                 THEN oi.quantity * oi.price END), 0)
        FROM orders o
        LEFT JOIN order_items oi ON oi.order_id = o.id
        WHERE o.business_id = ?2 AND o.created_at >= ?3 AND o.created_at < ?4
        GROUP BY day
        "#,
    )
    .bind(DAY_MILLIS)
    .bind(business_id)
    .bind(first_day)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let by_day: HashMap<i64, (i64, i64)> = rows
        .into_iter()
        .map(|(day, orders, revenue)| (day, (orders, revenue)))
        .collect();

    Ok((0..days)
        .map(|i| {
            let day = first_day + i * DAY_MILLIS;
            let (orders, revenue) = by_day.get(&day).copied().unwrap_or((0, 0));
            DailyRevenue {
                day_start: day,
                date: format_day(day),
                orders,
                revenue,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::{self, OrderLine};
    use crate::db::repository::{fixtures, order_item};
    use crate::db::test_pool;
    use shared::models::{EmployeeRole, OrderStatus};

    fn line(name: &str, price: i64, quantity: i32) -> OrderLine {
        OrderLine {
            menu_item_id: format!("mi-{name}"),
            name: name.into(),
            price,
            quantity,
            notes: None,
        }
    }

    async fn backdate(pool: &SqlitePool, order_id: &str, created_at: i64) {
        sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(order_id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day(1_704_067_200_000), "2024-01-01");
        assert_eq!(format_day(1_704_067_200_000 + DAY_MILLIS - 1), "2024-01-01");
    }

    #[tokio::test]
    async fn test_summary() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 1).await;

        let a = order::create(
            &pool,
            &biz.id,
            &table.id,
            &waiter.id,
            None,
            &[line("Soup", 500, 2), line("Tea", 200, 1)],
        )
        .await
        .unwrap();
        let b = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Soup", 500, 1)])
            .await
            .unwrap();
        let c = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Cake", 900, 4)])
            .await
            .unwrap();

        // Tea is cancelled before a is delivered
        let tea = order_item::list_by_order(&pool, &a.id)
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.name == "Tea")
            .unwrap();
        order_item::set_status(&pool, &tea.id, OrderStatus::Cancelled)
            .await
            .unwrap();
        order::set_status(&pool, &biz.id, &a.id, OrderStatus::Delivered)
            .await
            .unwrap();
        order::set_status(&pool, &biz.id, &b.id, OrderStatus::Delivered)
            .await
            .unwrap();
        order::set_status(&pool, &biz.id, &c.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let now = shared::util::now_millis();
        let s = summary(&pool, &biz.id, now - DAY_MILLIS, now + 1_000)
            .await
            .unwrap();
        assert_eq!(s.order_count, 3);
        assert_eq!(s.revenue, 1000 + 500);
        assert_eq!(s.average_order_value, 750);

        let delivered = s
            .orders_by_status
            .iter()
            .find(|c| c.status == OrderStatus::Delivered)
            .unwrap();
        assert_eq!(delivered.count, 2);

        assert_eq!(s.top_items.len(), 1);
        assert_eq!(s.top_items[0].name, "Soup");
        assert_eq!(s.top_items[0].quantity, 3);
        assert_eq!(s.top_items[0].revenue, 1500);

        let empty = summary(&pool, &biz.id, 0, 1).await.unwrap();
        assert_eq!(empty.order_count, 0);
        assert_eq!(empty.revenue, 0);
        assert_eq!(empty.average_order_value, 0);
    }

    #[tokio::test]
    async fn test_daily_zero_fills() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let waiter = fixtures::employee(&pool, &biz.id, "w@bistro.io", EmployeeRole::Waiter).await;
        let table = fixtures::table(&pool, &biz.id, 1).await;

        // 2024-01-10T12:00:00Z
        let now = 1_704_067_200_000 + 9 * DAY_MILLIS + 12 * 60 * 60 * 1000;

        let today = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Soup", 500, 1)])
            .await
            .unwrap();
        backdate(&pool, &today.id, now - 1_000).await;
        order::set_status(&pool, &biz.id, &today.id, OrderStatus::Delivered)
            .await
            .unwrap();

        let two_days_ago = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Tea", 200, 1)])
            .await
            .unwrap();
        backdate(&pool, &two_days_ago.id, now - 2 * DAY_MILLIS).await;

        let too_old = order::create(&pool, &biz.id, &table.id, &waiter.id, None, &[line("Tea", 200, 1)])
            .await
            .unwrap();
        backdate(&pool, &too_old.id, now - 10 * DAY_MILLIS).await;

        let days = daily(&pool, &biz.id, 3, now).await.unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, "2024-01-08");
        assert_eq!(days[0].orders, 1);
        // not delivered, no revenue
        assert_eq!(days[0].revenue, 0);
        assert_eq!(days[1].date, "2024-01-09");
        assert_eq!(days[1].orders, 0);
        assert_eq!(days[2].date, "2024-01-10");
        assert_eq!(days[2].orders, 1);
        assert_eq!(days[2].revenue, 500);
    }
}
