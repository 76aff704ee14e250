//! Reporting Models

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

/// Revenue for one UTC day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRevenue {
    /// Start of the day, UTC milliseconds
    pub day_start: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub orders: i64,
    /// Delivered revenue in cents
    pub revenue: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TopItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: i64,
}

/// Dashboard summary over `[from, to)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub from: i64,
    pub to: i64,
    pub order_count: i64,
    pub orders_by_status: Vec<StatusCount>,
    /// Delivered revenue in cents
    pub revenue: i64,
    /// Revenue per delivered order, in cents (0 when nothing was delivered)
    pub average_order_value: i64,
    pub top_items: Vec<TopItem>,
}
