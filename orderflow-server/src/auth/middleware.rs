//! Authentication middleware
//!
//! Axum middleware for JWT authentication and permission checks

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Uri};
use shared::ErrorCode;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::security_log;

/// API routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &[
    "/api/auth/register",
    "/api/auth/login",
    "/api/invitations/accept",
];

/// Authentication middleware
///
/// Validates `Authorization: Bearer <token>` and injects [`CurrentUser`]
/// into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (static pages, `/health`)
/// - [`PUBLIC_API_ROUTES`]
///
/// # Errors
///
/// | Case | Code |
/// |------|------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Bad token, or employee no longer exists | 401 TokenInvalid |
/// | Employee deactivated | 401 AccountDisabled |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri()).await?;
    req.extensions_mut().insert(user.clone());

    // Exposed to the request logging middleware
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Validate the bearer token and re-read the employee row
///
/// Role and active flag come from the database, so a demotion or
/// deactivation takes effect on the next request rather than at token expiry.
pub(crate) async fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized());
        }
    };

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.to_string()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let employee = employee::find_by_id(state.pool(), &claims.business_id, &claims.sub)
        .await?
        .ok_or_else(|| {
            security_log!("WARN", "auth_unknown_employee", user_id = claims.sub.clone());
            AppError::invalid_token("Employee no longer exists")
        })?;

    if !employee.is_active {
        security_log!("WARN", "auth_disabled", user_id = employee.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(CurrentUser::from(employee))
}

/// Permission check middleware
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/menus", post(handler::create))
///     .layer(middleware::from_fn(require_permission("menus:manage")));
/// ```
///
/// Returns 403 `PermissionDenied` when the caller's role lacks `permission`.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req.current_user()?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    role = user.role.as_str(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {permission}"
                ))
                .with_detail("permission", permission));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Read the [`CurrentUser`] injected by [`require_auth`]
pub trait CurrentUserExt {
    /// 401 when the request was not authenticated
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or_else(AppError::unauthorized)
    }
}
