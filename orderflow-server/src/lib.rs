//! OrderFlow server - multi-tenant restaurant ordering backend
//!
//! # Modules
//!
//! ```text
//! orderflow-server/src/
//! ├── core/          # config, state, startup errors, HTTP server
//! ├── auth/          # JWT, argon2 passwords, role permissions, middleware
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── api/           # REST routes and handlers
//! ├── middleware/    # request logging
//! └── utils/         # logger, input validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

/// Security event on the `security` target
///
/// ```ignore
/// security_log!("WARN", "login_failed", user_id = employee.id.clone());
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> core::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  ____          __          ______
 / __ \_______/ /__ ____  / __/ /__ _    __
/ /_/ / __/ _  / -_) __/ / _// / _ \ |/|/ /
\____/_/  \_,_/\__/_/   /_/ /_/\___/__,__/
    "#
    );
}
