//! Employee Repository
//!
//! The only place that reads `hashed_password`; it leaves this module
//! inside [`EmployeeCredentials`] and nowhere else.

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeRole, EmployeeUpdate};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, business_id, name, email, role, is_active, created_at, updated_at";

/// Employee plus password hash, for login and password change
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeCredentials {
    #[sqlx(flatten)]
    pub employee: Employee,
    pub hashed_password: String,
}

pub async fn create(
    conn: &mut SqliteConnection,
    business_id: &str,
    name: &str,
    email: &str,
    hashed_password: &str,
    role: EmployeeRole,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let employee = Employee {
        id: shared::util::new_id(),
        business_id: business_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO employees (id, business_id, name, email, hashed_password, role, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&employee.id)
    .bind(&employee.business_id)
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(hashed_password)
    .bind(employee.role)
    .bind(employee.created_at)
    .bind(employee.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(employee)
}

pub async fn list(pool: &SqlitePool, business_id: &str) -> RepoResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE business_id = ? ORDER BY name"
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
) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE business_id = ? AND id = ?"
    ))
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Login lookup; emails are unique across all businesses
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<EmployeeCredentials>> {
    let row = sqlx::query_as::<_, EmployeeCredentials>(&format!(
        "SELECT {COLUMNS}, hashed_password FROM employees WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_credentials_by_id(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<EmployeeCredentials>> {
    let row = sqlx::query_as::<_, EmployeeCredentials>(&format!(
        "SELECT {COLUMNS}, hashed_password FROM employees WHERE business_id = ? AND id = ?"
    ))
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn update_password(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
    hashed_password: &str,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE employees SET hashed_password = ?, updated_at = ? WHERE business_id = ? AND id = ?",
    )
    .bind(hashed_password)
    .bind(shared::util::now_millis())
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("employee {id}")));
    }
    Ok(())
}

/// Keeps the row unless it is the business's last active manager
const KEEPS_A_MANAGER: &str = r#"
    (NOT (role = 'manager' AND is_active = 1)
     OR EXISTS (SELECT 1 FROM employees m
                WHERE m.business_id = employees.business_id AND m.id <> employees.id
                  AND m.role = 'manager' AND m.is_active = 1))
"#;

/// Tell a missing row from one the manager guard refused
async fn guard_failure(pool: &SqlitePool, business_id: &str, id: &str) -> RepoError {
    match find_by_id(pool, business_id, id).await {
        Ok(Some(_)) => RepoError::LastManager(format!("employee {id}")),
        Ok(None) => RepoError::NotFound(format!("employee {id}")),
        Err(e) => e,
    }
}

/// Update name, role and active flag
///
/// Demoting or deactivating the last active manager fails with
/// [`RepoError::LastManager`]; the check runs inside the UPDATE.
pub async fn update(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
    data: &EmployeeUpdate,
) -> RepoResult<Employee> {
    let rows = sqlx::query(&format!(
        r#"
        UPDATE employees SET
            name = COALESCE(?1, name),
            role = COALESCE(?2, role),
            is_active = COALESCE(?3, is_active),
            updated_at = ?4
        WHERE business_id = ?5 AND id = ?6
          AND ((COALESCE(?2, role) = 'manager' AND COALESCE(?3, is_active) = 1)
               OR {KEEPS_A_MANAGER})
        "#
    ))
    .bind(&data.name)
    .bind(data.role)
    .bind(data.is_active)
    .bind(shared::util::now_millis())
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(guard_failure(pool, business_id, id).await);
    }

    find_by_id(pool, business_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("employee {id}")))
}

/// Delete an employee; the last active manager is refused
pub async fn delete(pool: &SqlitePool, business_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query(&format!(
        "DELETE FROM employees WHERE business_id = ? AND id = ? AND {KEEPS_A_MANAGER}"
    ))
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(guard_failure(pool, business_id, id).await);
    }
    Ok(())
}

#[cfg(test)]
async fn count_active_managers(pool: &SqlitePool, business_id: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employees WHERE business_id = ? AND role = 'manager' AND is_active = 1",
    )
    .bind(business_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Whether the employee has orders on record (blocks hard delete)
pub async fn has_orders(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE employee_id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
