//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employee role; drives permissions and the landing page after login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EmployeeRole {
    Manager,
    Cashier,
    Cook,
    Waiter,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 4] = [
        EmployeeRole::Manager,
        EmployeeRole::Cashier,
        EmployeeRole::Cook,
        EmployeeRole::Waiter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Cashier => "cashier",
            Self::Cook => "cook",
            Self::Waiter => "waiter",
        }
    }

    /// Page the browser is sent to after login
    pub fn home_page(&self) -> &'static str {
        match self {
            Self::Manager => "/dashboard",
            Self::Cashier => "/orders",
            Self::Cook => "/kitchen",
            Self::Waiter => "/tables",
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            "cook" => Ok(Self::Cook),
            "waiter" => Ok(Self::Waiter),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Employee entity (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub email: String,
    pub role: EmployeeRole,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Update employee payload (manager only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<EmployeeRole>,
    pub is_active: Option<bool>,
}
