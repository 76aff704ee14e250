//! Input validation helpers
//!
//! SQLite TEXT has no length enforcement, so handlers check lengths here
//! before anything is written.

use shared::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Business, employee, menu and menu item names
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

pub const MAX_ADDRESS_LEN: usize = 500;

/// Upper bound on a single line's quantity
pub const MAX_QUANTITY: i32 = 999;

/// Upper bound on a menu item price, in cents (1,000,000.00)
pub const MAX_PRICE: i64 = 100_000_000;

// ── Text ────────────────────────────────────────────────────────────

/// Required string: non-blank and within the length limit
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Optional string: when present, within the length limit
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Lowercase and trim an email, then check its shape (`local@domain.tld`)
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation("email is not a valid address").with_detail("field", "email"));
    }
    Ok(email)
}

/// Password length between `min_len` and [`MAX_PASSWORD_LEN`]
pub fn validate_password(password: &str, min_len: usize) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < min_len {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {min_len} characters"),
        )
        .with_detail("min_length", min_len));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

// ── Numbers ─────────────────────────────────────────────────────────

pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity <= 0 || quantity > MAX_QUANTITY {
        return Err(AppError::new(ErrorCode::InvalidQuantity).with_detail("quantity", quantity));
    }
    Ok(())
}

/// Prices are cents, between 0 and [`MAX_PRICE`]
pub fn validate_price(price: i64) -> Result<(), AppError> {
    if !(0..=MAX_PRICE).contains(&price) {
        return Err(AppError::new(ErrorCode::InvalidPrice).with_detail("price", price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Soup", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
        // multi-byte characters count as one
        assert!(validate_required_text(&"é".repeat(200), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "notes", 5).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ana@Bistro.IO ").unwrap(),
            "ana@bistro.io"
        );
        for bad in ["", "ana", "ana@", "@bistro.io", "ana@bistro", "a@b@c.io", "a b@c.io", "ana@.io"] {
            assert!(normalize_email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_password() {
        assert!(validate_password("12345678", 8).is_ok());
        let err = validate_password("1234567", 8).unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);
        assert!(validate_password(&"x".repeat(129), 8).is_err());
    }

    #[test]
    fn test_numbers() {
        assert!(validate_quantity(1).is_ok());
        assert_eq!(
            validate_quantity(0).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(1000).is_err());
        assert!(validate_price(0).is_ok());
        assert_eq!(validate_price(-1).unwrap_err().code, ErrorCode::InvalidPrice);
        assert!(validate_price(MAX_PRICE).is_ok());
        assert_eq!(
            validate_price(MAX_PRICE + 1).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert!(validate_price(5_000_000_000_000_000_000).is_err());
    }
}
