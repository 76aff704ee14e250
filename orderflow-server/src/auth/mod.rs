//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates tokens
//! - [`CurrentUser`] is the authenticated caller
//! - [`require_auth`] / [`require_permission`] middleware
//! - [`hash_password`] / [`verify_password`] for stored credentials

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_auth, require_permission};
pub use password::{hash_password, verify_password};
