//! Shared types for OrderFlow
//!
//! Error codes, response envelopes and the domain models used by the
//! server and by anything that talks to its REST API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
