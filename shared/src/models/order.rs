//! Order and Order Item Models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status shared by orders and order items
///
/// `pending → in_progress → ready → delivered`, or `cancelled` at any point.
/// Transitions are direct writes; the database CHECK constraint is the only
/// gate on the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Still on the floor (not delivered, not cancelled)
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::Ready)
    }

    /// Work the kitchen still has to do
    pub fn is_kitchen_work(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Order entity: a tab opened against a table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub business_id: String,
    pub table_id: String,
    /// Employee who opened the order
    pub employee_id: String,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line. `name` and `price` are snapshots of the menu item at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderItem {
    /// quantity × unit price, in cents (saturates instead of wrapping)
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(self.price)
    }
}

/// Order with its items and computed total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: i32,
    pub items: Vec<OrderItem>,
    /// Sum of non-cancelled lines, in cents
    pub total: i64,
}

impl OrderDetail {
    pub fn new(order: Order, table_number: i32, items: Vec<OrderItem>) -> Self {
        let total = order_total(&items);
        Self {
            order,
            table_number,
            items,
            total,
        }
    }
}

/// Sum of line totals, skipping cancelled lines
pub fn order_total(items: &[OrderItem]) -> i64 {
    items
        .iter()
        .filter(|item| item.status != OrderStatus::Cancelled)
        .map(OrderItem::line_total)
        .fold(0, i64::saturating_add)
}

/// Line requested when opening an order or adding to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Open a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Add lines to an existing order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddItems {
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

/// Status change for an order or a single item
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Kitchen ticket: one line the kitchen still has to prepare
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KitchenTicket {
    pub item_id: String,
    pub order_id: String,
    pub table_number: i32,
    pub name: String,
    pub quantity: i32,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    /// Seconds since the line was ordered
    pub age_seconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, price: i64, status: OrderStatus) -> OrderItem {
        OrderItem {
            id: "i".into(),
            order_id: "o".into(),
            menu_item_id: "m".into(),
            name: "Soup".into(),
            quantity,
            price,
            status,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(
            "in_progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert!("done".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert!(serde_json::from_str::<OrderStatus>("\"InProgress\"").is_err());
    }

    #[test]
    fn test_status_groups() {
        assert!(OrderStatus::Ready.is_open());
        assert!(!OrderStatus::Delivered.is_open());
        assert!(!OrderStatus::Cancelled.is_open());
        assert!(OrderStatus::Pending.is_kitchen_work());
        assert!(!OrderStatus::Ready.is_kitchen_work());
    }

    #[test]
    fn test_order_total_skips_cancelled() {
        let items = vec![
            item(2, 450, OrderStatus::Pending),
            item(1, 1200, OrderStatus::Delivered),
            item(3, 999, OrderStatus::Cancelled),
        ];
        assert_eq!(order_total(&items), 2 * 450 + 1200);
        assert_eq!(order_total(&[]), 0);
    }

    #[test]
    fn test_order_total_saturates() {
        let items = vec![
            item(2, i64::MAX / 2 + 1, OrderStatus::Pending),
            item(999, 5_000_000_000_000_000_000, OrderStatus::Ready),
        ];
        assert_eq!(items[0].line_total(), i64::MAX);
        assert_eq!(order_total(&items), i64::MAX);
    }

    #[test]
    fn test_order_detail_flattens_order() {
        let order = Order {
            id: "o1".into(),
            business_id: "b1".into(),
            table_id: "t1".into(),
            employee_id: "e1".into(),
            status: OrderStatus::Pending,
            notes: None,
            created_at: 1,
            updated_at: 1,
        };
        let detail = OrderDetail::new(order, 7, vec![item(1, 300, OrderStatus::Pending)]);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "o1");
        assert_eq!(json["table_number"], 7);
        assert_eq!(json["total"], 300);
        assert_eq!(json["status"], "pending");
    }
}
