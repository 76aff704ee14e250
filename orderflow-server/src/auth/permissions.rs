//! Permission Definitions
//!
//! Role-based permissions. Roles are fixed (manager, cashier, cook,
//! waiter); each maps to a static permission list. Managers hold `all`.

use shared::models::EmployeeRole;

pub const BUSINESS_MANAGE: &str = "business:manage";
pub const EMPLOYEES_MANAGE: &str = "employees:manage";
pub const MENUS_READ: &str = "menus:read";
pub const MENUS_MANAGE: &str = "menus:manage";
pub const TABLES_READ: &str = "tables:read";
pub const TABLES_MANAGE: &str = "tables:manage";
pub const ORDERS_READ: &str = "orders:read";
pub const ORDERS_WRITE: &str = "orders:write";
pub const ORDERS_STATUS: &str = "orders:status";
pub const REPORTS_VIEW: &str = "reports:view";

/// Every grantable permission
pub const ALL_PERMISSIONS: &[&str] = &[
    BUSINESS_MANAGE,
    EMPLOYEES_MANAGE,
    MENUS_READ,
    MENUS_MANAGE,
    TABLES_READ,
    TABLES_MANAGE,
    ORDERS_READ,
    ORDERS_WRITE,
    ORDERS_STATUS,
    REPORTS_VIEW,
];

pub const MANAGER_PERMISSIONS: &[&str] = &["all"];

/// Front-of-house with the till and reports
pub const CASHIER_PERMISSIONS: &[&str] = &[
    MENUS_READ,
    TABLES_READ,
    ORDERS_READ,
    ORDERS_WRITE,
    ORDERS_STATUS,
    REPORTS_VIEW,
];

pub const WAITER_PERMISSIONS: &[&str] = &[
    MENUS_READ,
    TABLES_READ,
    ORDERS_READ,
    ORDERS_WRITE,
    ORDERS_STATUS,
];

/// Kitchen: reads orders and moves item status
pub const COOK_PERMISSIONS: &[&str] = &[MENUS_READ, ORDERS_READ, ORDERS_STATUS];

/// Permissions granted to a role
pub fn permissions_for(role: EmployeeRole) -> &'static [&'static str] {
    match role {
        EmployeeRole::Manager => MANAGER_PERMISSIONS,
        EmployeeRole::Cashier => CASHIER_PERMISSIONS,
        EmployeeRole::Waiter => WAITER_PERMISSIONS,
        EmployeeRole::Cook => COOK_PERMISSIONS,
    }
}

/// Whether `role` holds `permission` (`all` grants everything)
pub fn role_has_permission(role: EmployeeRole, permission: &str) -> bool {
    permissions_for(role)
        .iter()
        .any(|p| *p == "all" || *p == permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_has_everything() {
        for p in ALL_PERMISSIONS {
            assert!(role_has_permission(EmployeeRole::Manager, p));
        }
    }

    #[test]
    fn test_cook_is_kitchen_only() {
        assert!(role_has_permission(EmployeeRole::Cook, ORDERS_READ));
        assert!(role_has_permission(EmployeeRole::Cook, ORDERS_STATUS));
        assert!(!role_has_permission(EmployeeRole::Cook, ORDERS_WRITE));
        assert!(!role_has_permission(EmployeeRole::Cook, TABLES_MANAGE));
        assert!(!role_has_permission(EmployeeRole::Cook, REPORTS_VIEW));
    }

    #[test]
    fn test_front_of_house() {
        assert!(role_has_permission(EmployeeRole::Waiter, ORDERS_WRITE));
        assert!(!role_has_permission(EmployeeRole::Waiter, REPORTS_VIEW));
        assert!(role_has_permission(EmployeeRole::Cashier, REPORTS_VIEW));
        assert!(!role_has_permission(EmployeeRole::Cashier, EMPLOYEES_MANAGE));
        assert!(!role_has_permission(EmployeeRole::Cashier, MENUS_MANAGE));
    }

    #[test]
    fn test_role_lists_only_contain_known_permissions() {
        for role in [
            EmployeeRole::Cashier,
            EmployeeRole::Waiter,
            EmployeeRole::Cook,
        ] {
            assert!(permissions_for(role).iter().all(|p| ALL_PERMISSIONS.contains(p)));
        }
        assert!(!role_has_permission(EmployeeRole::Cashier, "orders:*"));
    }
}
