//! Invitation Model

use serde::{Deserialize, Serialize};

use super::employee::EmployeeRole;

/// Pending or accepted invitation for a new employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invitation {
    pub id: String,
    pub business_id: String,
    pub email: String,
    pub role: EmployeeRole,
    pub token: String,
    pub invited_by: String,
    pub expires_at: i64,
    pub accepted_at: Option<i64>,
    pub created_at: i64,
}

impl Invitation {
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }
}

/// Create invitation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationCreate {
    pub email: String,
    pub role: EmployeeRole,
}

/// Accept invitation payload (public endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationAccept {
    pub token: String,
    pub name: String,
    pub password: String,
}
