//! # Authentication Middleware
//!
//! This module contains the authentication middleware that validates JWT tokens
//! and provides user context to protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, User};
use crate::services::jwt::JwtError;

/// Authentication middleware for protecting routes
///
/// This middleware validates JWT access tokens from the Authorization header
/// and resolves the token subject to a stored user. Protected routes receive
/// the resolved user through request extensions.
///
/// # Authentication Flow
///
/// 1. Extracts `Authorization` header with `Bearer <token>` format, any scheme case
/// 2. Validates the JWT token signature and expiration
/// 3. Looks up the user by the email stored in the `sub` claim
/// 4. Adds [`AuthUser`] to request extensions for handler access
///
/// # Returns
///
/// - **Success**: Continues to next handler with user context
/// - **Failure**: `401 Unauthorized` with `Token has expired.`, `Invalid token.`
///   or `User not found.` as detail
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    trace!("Processing authentication middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing Authorization header");
        return Err(AppError::Unauthorized("Not authenticated"));
    };

    // The auth scheme is case-insensitive (RFC 7235).
    let token = auth_header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim());
    let Some(token) = token else {
        warn!("Invalid Authorization header format");
        return Err(AppError::Unauthorized("Not authenticated"));
    };
    trace!("Extracted bearer token from Authorization header");

    let claims = state
        .jwt_service
        .validate_access_token(token)
        .map_err(|e| {
            warn!(error = %e, "Token validation failed");
            match e {
                JwtError::TokenExpired => AppError::Unauthorized("Token has expired."),
                _ => AppError::Unauthorized("Invalid token."),
            }
        })?;

    let Some(user) = User::find_by_email(&state.db_pool, &claims.sub).await? else {
        warn!("Token subject does not match any user");
        return Err(AppError::Unauthorized("User not found."));
    };

    debug!(user_id = %user.id, "Authentication successful");
    req.extensions_mut().insert(AuthUser {
        user_id: user.id,
        account: user,
    });

    Ok(next.run(req).await)
}

/// Authenticated user information available to handlers
///
/// This struct is inserted into request extensions by the authentication
/// middleware and can be extracted by route handlers that need user context.
///
/// # Usage in Handlers
///
/// ```rust
/// use axum::{extract::Extension, response::IntoResponse};
/// use energy_advisor::middleware::AuthUser;
/// async fn protected_handler(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
///     format!("Hello {}", user.account.full_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Unique identifier for the authenticated user
    pub user_id: Uuid,
    /// The user row as read while authenticating this request
    pub account: User,
}
