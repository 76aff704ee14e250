//! Unified error codes for OrderFlow
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Business (tenant) errors
//! - 4xxx: Order errors
//! - 5xxx: Menu errors
//! - 6xxx: Table errors
//! - 7xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so the browser pages can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value violates a database constraint
    ConstraintViolation = 6,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Password shorter than the configured minimum
    PasswordTooShort = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Manager role required
    ManagerRequired = 2002,
    /// A manager cannot demote, deactivate or delete their own account
    CannotModifySelf = 2003,

    // ==================== 3xxx: Business ====================
    /// Business not found
    BusinessNotFound = 3001,
    /// Email already registered
    EmailAlreadyRegistered = 3002,
    /// Invitation not found
    InvitationNotFound = 3003,
    /// Invitation has expired
    InvitationExpired = 3004,
    /// Invitation already accepted
    InvitationAlreadyUsed = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Order is delivered or cancelled
    OrderClosed = 4003,
    /// Order has no items
    OrderEmpty = 4004,
    /// Quantity must be positive
    InvalidQuantity = 4005,

    // ==================== 5xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 5001,
    /// Menu item not found
    MenuItemNotFound = 5002,
    /// Menu item is not available
    MenuItemUnavailable = 5003,
    /// Menu name already exists
    MenuNameExists = 5004,
    /// Menu item price is invalid
    InvalidPrice = 5005,

    // ==================== 6xxx: Table ====================
    /// Table not found
    TableNotFound = 6001,
    /// Table number already exists
    TableNumberExists = 6002,
    /// Table still has open orders
    TableHasOpenOrders = 6003,
    /// Table is inactive
    TableInactive = 6004,
    /// Table has past orders and can only be deactivated
    TableHasOrderHistory = 6005,

    // ==================== 7xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 7001,
    /// Employee email already exists
    EmployeeEmailExists = 7002,
    /// Business must keep at least one active manager
    LastManager = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::ConstraintViolation => "Value violates a data constraint",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::PasswordTooShort => "Password is too short",

            Self::PermissionDenied => "Permission denied",
            Self::ManagerRequired => "Manager role required",
            Self::CannotModifySelf => "You cannot change your own role or status",

            Self::BusinessNotFound => "Business not found",
            Self::EmailAlreadyRegistered => "Email is already registered",
            Self::InvitationNotFound => "Invitation not found",
            Self::InvitationExpired => "Invitation has expired",
            Self::InvitationAlreadyUsed => "Invitation has already been accepted",

            Self::OrderNotFound => "Order not found",
            Self::OrderItemNotFound => "Order item not found",
            Self::OrderClosed => "Order is already closed",
            Self::OrderEmpty => "Order has no items",
            Self::InvalidQuantity => "Quantity must be greater than zero",

            Self::MenuNotFound => "Menu not found",
            Self::MenuItemNotFound => "Menu item not found",
            Self::MenuItemUnavailable => "Menu item is not available",
            Self::MenuNameExists => "Menu name already exists",
            Self::InvalidPrice => "Price must not be negative",

            Self::TableNotFound => "Table not found",
            Self::TableNumberExists => "Table number already exists",
            Self::TableHasOpenOrders => "Table still has open orders",
            Self::TableInactive => "Table is inactive",
            Self::TableHasOrderHistory => "Table has order history; deactivate it instead",

            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeEmailExists => "Employee email already exists",
            Self::LastManager => "Business must keep at least one active manager",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::ConstraintViolation,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::PasswordTooShort,

            2001 => Self::PermissionDenied,
            2002 => Self::ManagerRequired,
            2003 => Self::CannotModifySelf,

            3001 => Self::BusinessNotFound,
            3002 => Self::EmailAlreadyRegistered,
            3003 => Self::InvitationNotFound,
            3004 => Self::InvitationExpired,
            3005 => Self::InvitationAlreadyUsed,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderItemNotFound,
            4003 => Self::OrderClosed,
            4004 => Self::OrderEmpty,
            4005 => Self::InvalidQuantity,

            5001 => Self::MenuNotFound,
            5002 => Self::MenuItemNotFound,
            5003 => Self::MenuItemUnavailable,
            5004 => Self::MenuNameExists,
            5005 => Self::InvalidPrice,

            6001 => Self::TableNotFound,
            6002 => Self::TableNumberExists,
            6003 => Self::TableHasOpenOrders,
            6004 => Self::TableInactive,
            6005 => Self::TableHasOrderHistory,

            7001 => Self::EmployeeNotFound,
            7002 => Self::EmployeeEmailExists,
            7003 => Self::LastManager,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::InvitationExpired.code(), 3004);
        assert_eq!(ErrorCode::OrderClosed.code(), 4003);
        assert_eq!(ErrorCode::MenuItemUnavailable.code(), 5003);
        assert_eq!(ErrorCode::TableNumberExists.code(), 6002);
        assert_eq!(ErrorCode::LastManager.code(), 7003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_try_from_covers_every_code() {
        for value in [0u16, 1, 2, 3, 4, 5, 6, 1001, 1006, 2003, 3005, 4005, 5005, 6005, 7003, 9003] {
            let code = ErrorCode::try_from(value).expect("known code");
            assert_eq!(code.code(), value);
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(8888), Err(InvalidErrorCode(8888)));
        assert_eq!(
            InvalidErrorCode(8888).to_string(),
            "invalid error code: 8888"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::TableNotFound).unwrap();
        assert_eq!(json, "6001");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::OrderNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid email or password"
        );
    }
}
