//! Invitation Repository

use super::{RepoError, RepoResult};
use shared::models::{EmployeeRole, Invitation};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str =
    "id, business_id, email, role, token, invited_by, expires_at, accepted_at, created_at";

pub async fn create(
    pool: &SqlitePool,
    business_id: &str,
    email: &str,
    role: EmployeeRole,
    token: &str,
    invited_by: &str,
    expires_at: i64,
) -> RepoResult<Invitation> {
    let invitation = Invitation {
        id: shared::util::new_id(),
        business_id: business_id.to_string(),
        email: email.to_string(),
        role,
        token: token.to_string(),
        invited_by: invited_by.to_string(),
        expires_at,
        accepted_at: None,
        created_at: shared::util::now_millis(),
    };

    sqlx::query(
        "INSERT INTO invitations (id, business_id, email, role, token, invited_by, expires_at, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&invitation.id)
    .bind(&invitation.business_id)
    .bind(&invitation.email)
    .bind(invitation.role)
    .bind(&invitation.token)
    .bind(&invitation.invited_by)
    .bind(invitation.expires_at)
    .bind(invitation.created_at)
    .execute(pool)
    .await?;

    Ok(invitation)
}

/// Newest first
pub async fn list(pool: &SqlitePool, business_id: &str) -> RepoResult<Vec<Invitation>> {
    let rows = sqlx::query_as::<_, Invitation>(&format!(
        "SELECT {COLUMNS} FROM invitations WHERE business_id = ? ORDER BY created_at DESC"
    ))
    .bind(business_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Token lookup for the public accept endpoint; not tenant scoped
pub async fn find_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> RepoResult<Option<Invitation>> {
    let row = sqlx::query_as::<_, Invitation>(&format!(
        "SELECT {COLUMNS} FROM invitations WHERE token = ?"
    ))
    .bind(token)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// Mark accepted; returns false when it was already accepted
pub async fn mark_accepted(conn: &mut SqliteConnection, id: &str, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE invitations SET accepted_at = ? WHERE id = ? AND accepted_at IS NULL",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn delete(pool: &SqlitePool, business_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM invitations WHERE business_id = ? AND id = ?")
        .bind(business_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("invitation {id}")));
    }
    Ok(())
}
