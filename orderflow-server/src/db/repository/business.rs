//! Business Repository

use super::{RepoError, RepoResult};
use shared::models::{Business, BusinessUpdate};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";

/// Insert a business; runs inside the registration transaction
pub async fn create(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    phone: Option<&str>,
    address: Option<&str>,
) -> RepoResult<Business> {
    let now = shared::util::now_millis();
    let business = Business {
        id: shared::util::new_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        address: address.map(str::to_string),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO businesses (id, name, email, phone, address, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&business.id)
    .bind(&business.name)
    .bind(&business.email)
    .bind(&business.phone)
    .bind(&business.address)
    .bind(business.created_at)
    .bind(business.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(business)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Business>> {
    let row = sqlx::query_as::<_, Business>(&format!(
        "SELECT {COLUMNS} FROM businesses WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Whether an email is used by any business or any employee
pub async fn email_taken(conn: &mut SqliteConnection, email: &str) -> RepoResult<bool> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM businesses WHERE email = ?1) OR EXISTS(SELECT 1 FROM employees WHERE email = ?1)",
    )
    .bind(email)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

pub async fn update(pool: &SqlitePool, id: &str, data: &BusinessUpdate) -> RepoResult<Business> {
    let rows = sqlx::query(
        r#"
        UPDATE businesses SET
            name = COALESCE(?1, name),
            phone = COALESCE(?2, phone),
            address = COALESCE(?3, address),
            updated_at = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("business {id}")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("business {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures;
    use crate::db::test_pool;
    use shared::models::EmployeeRole;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;

        let found = find_by_id(&pool, &biz.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Bistro");
        assert_eq!(found.email, "owner@bistro.io");
        assert!(find_by_id(&pool, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_taken_checks_both_tables() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        fixtures::employee(&pool, &biz.id, "cook@bistro.io", EmployeeRole::Cook).await;

        let mut conn = pool.acquire().await.unwrap();
        assert!(email_taken(&mut conn, "owner@bistro.io").await.unwrap());
        assert!(email_taken(&mut conn, "cook@bistro.io").await.unwrap());
        assert!(!email_taken(&mut conn, "new@bistro.io").await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;

        let updated = update(
            &pool,
            &biz.id,
            &BusinessUpdate {
                phone: Some("555-0100".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Bistro");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));

        let missing = update(&pool, "nope", &BusinessUpdate::default()).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }
}
