//! # Authentication Handlers
//!
//! Account registration and password login. A successful login yields an
//! HS256 access token whose subject is the user's email; protected routes
//! resolve that email back to a user in the authentication middleware.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, NewUser, User};
use crate::services::password::{hash_password, verify_password};
use crate::utils::validator::{validate_not_blank, validate_password_strength, validate_phone_number};

const DUPLICATE_EMAIL: &str = "Email already registered.";
const DUPLICATE_PHONE_NUMBER: &str = "Phone number already registered.";

/// Request payload for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_not_blank"), length(max = 100))]
    pub full_name: String,
    #[validate(email, length(max = 150))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: Uuid,
}

/// OAuth2 password-flow form; `username` carries the email
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login result. Either the token fields or the error fields are present.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TokenResponse {
    fn authentication_failed() -> Self {
        Self {
            error: Some("Authentication Failed".to_string()),
            detail: Some("Incorrect email or password".to_string()),
            ..Default::default()
        }
    }
}

/// Maps a unique-key violation on `users` to the matching duplicate message.
fn duplicate_user_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_email_key") => return AppError::BadRequest(DUPLICATE_EMAIL),
            Some("users_phone_number_key") => return AppError::BadRequest(DUPLICATE_PHONE_NUMBER),
            _ => {}
        }
    }
    AppError::Db(e)
}

/// Registers a new user.
///
/// POST /register
///
/// # Returns
///
/// - `201 Created` - `{message, id}`
/// - `400 Bad Request` - Email or phone number already registered
/// - `422 Unprocessable Entity` - Payload failed validation
/// - `500 Internal Server Error` - Database or hashing failure
#[instrument(
    skip_all,
    fields(
        email = %payload.email,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing registration request");

    // 1. Validate format
    payload.validate().inspect_err(|_| warn!("Invalid registration payload"))?;

    // 2. Reject duplicates
    if User::email_exists(&state.db_pool, &payload.email).await? {
        warn!("Registration attempt with an existing email");
        return Err(AppError::BadRequest(DUPLICATE_EMAIL));
    }
    if User::phone_number_exists(&state.db_pool, &payload.phone_number).await? {
        warn!("Registration attempt with an existing phone number");
        return Err(AppError::BadRequest(DUPLICATE_PHONE_NUMBER));
    }

    // 3. Hash password off the async runtime
    let password_hash = hash_password(payload.password).await?;

    // 4. Insert; a concurrent registration can still hit the unique keys
    let user_id = User::insert(
        &state.db_pool,
        &NewUser {
            full_name: payload.full_name.trim(),
            email: &payload.email,
            phone_number: &payload.phone_number,
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(duplicate_user_error)?;

    info!(%user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            id: user_id,
        }),
    ))
}

/// Verifies credentials and issues an access token.
///
/// POST /token
///
/// # Returns
///
/// - `200 OK` with `{access_token, token_type, expires_in}` on success
/// - `200 OK` with `{error, detail}` for an unknown email or wrong password
/// - `500 Internal Server Error` - Database, hashing or signing failure
#[instrument(
    skip_all,
    fields(
        email = %form.username,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    debug!("Processing login request");

    let Some(user) = User::find_by_email(&state.db_pool, &form.username).await? else {
        warn!("Login attempt for unknown email");
        return Ok(Json(TokenResponse::authentication_failed()));
    };

    if !verify_password(form.password, user.password_hash).await? {
        warn!(user_id = %user.id, "Login attempt with incorrect password");
        return Ok(Json(TokenResponse::authentication_failed()));
    }

    let access_token = state
        .jwt_service
        .create_access_token(&user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to create access token");
            AppError::Internal
        })?;

    info!(user_id = %user.id, "User logged in");
    Ok(Json(TokenResponse {
        access_token: Some(access_token),
        token_type: Some("bearer".to_string()),
        expires_in: Some(state.jwt_service.expires_in()),
        ..Default::default()
    }))
}
