//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4 strings; timestamps are UTC milliseconds.

pub mod business;
pub mod dining_table;
pub mod employee;
pub mod invitation;
pub mod menu;
pub mod order;
pub mod stats;

// Re-exports
pub use business::*;
pub use dining_table::*;
pub use employee::*;
pub use invitation::*;
pub use menu::*;
pub use order::*;
pub use stats::*;
