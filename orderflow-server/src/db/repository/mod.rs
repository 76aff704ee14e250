//! Repository Module
//!
//! Tenant-scoped CRUD over the SQLite tables. Every lookup takes the
//! business ID; a row owned by another business is reported as absent.

// Tenancy
pub mod business;
pub mod employee;
pub mod invitation;

// Menu
pub mod menu;
pub mod menu_item;

// Floor
pub mod dining_table;

// Orders
pub mod kitchen;
pub mod order;
pub mod order_item;

// Reporting
pub mod stats;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The change would leave the business without an active manager
    #[error("Last active manager: {0}")]
    LastManager(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_check_violation() || db.is_foreign_key_violation() => {
                RepoError::Constraint(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Constraint(msg) => {
                AppError::with_message(ErrorCode::ConstraintViolation, msg)
            }
            RepoError::LastManager(_) => AppError::new(ErrorCode::LastManager),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl RepoError {
    /// Map to an [`AppError`] with domain codes for the missing-row and
    /// unique-violation cases
    pub fn into_app_error(self, not_found: ErrorCode, duplicate: ErrorCode) -> AppError {
        match self {
            RepoError::NotFound(_) => AppError::new(not_found),
            RepoError::Duplicate(_) => AppError::new(duplicate),
            other => other.into(),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Seed helpers shared by the repository tests

    use shared::models::{
        Business, DiningTable, DiningTableCreate, Employee, EmployeeRole, Menu, MenuCreate,
        MenuItem, MenuItemCreate, MenuItemType,
    };
    use sqlx::SqlitePool;

    pub async fn business(pool: &SqlitePool, email: &str) -> Business {
        let mut conn = pool.acquire().await.unwrap();
        super::business::create(&mut conn, "Bistro", email, None, None)
            .await
            .unwrap()
    }

    pub async fn employee(
        pool: &SqlitePool,
        business_id: &str,
        email: &str,
        role: EmployeeRole,
    ) -> Employee {
        let mut conn = pool.acquire().await.unwrap();
        super::employee::create(&mut conn, business_id, "Sam", email, "not-a-hash", role)
            .await
            .unwrap()
    }

    pub async fn table(pool: &SqlitePool, business_id: &str, number: i32) -> DiningTable {
        super::dining_table::create(
            pool,
            business_id,
            &DiningTableCreate {
                number,
                capacity: Some(4),
            },
        )
        .await
        .unwrap()
    }

    pub async fn menu(pool: &SqlitePool, business_id: &str, name: &str) -> Menu {
        super::menu::create(
            pool,
            business_id,
            &MenuCreate {
                name: name.into(),
                description: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn menu_item(pool: &SqlitePool, menu: &Menu, name: &str, price: i64) -> MenuItem {
        super::menu_item::create(
            pool,
            &menu.business_id,
            &menu.id,
            &MenuItemCreate {
                name: name.into(),
                description: None,
                price,
                item_type: MenuItemType::Food,
                image_url: None,
            },
        )
        .await
        .unwrap()
    }
}
