//! # Profile Handlers
//!
//! The authenticated user's own account: profile and preferences, the
//! notification history, and account deletion.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, DeletedRecords, Notification, NotificationFrequency, User};

/// Response containing user profile information
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub notification_frequency: NotificationFrequency,
    pub preferred_weather_tips: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone_number: user.phone_number,
            notification_frequency: user.notification_frequency,
            preferred_weather_tips: user.preferred_weather_tips,
            created_at: user.created_at,
        }
    }
}

/// Partial update of the notification preferences
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub notification_frequency: Option<NotificationFrequency>,
    pub preferred_weather_tips: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub message: &'static str,
    pub deleted: DeletedRecords,
}

/// Gets the authenticated user's profile information.
///
/// GET /users/me
///
/// # Returns
///
/// - `200 OK` with [`ProfileResponse`]
/// - `401 Unauthorized` - Missing or invalid authentication token
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn get_profile(Extension(user): Extension<AuthUser>) -> Json<ProfileResponse> {
    debug!("Processing profile request");
    Json(user.account.into())
}

/// Updates notification preferences. Omitted fields keep their value.
///
/// PATCH /users/me/preferences
///
/// # Returns
///
/// - `200 OK` with the updated [`ProfileResponse`]
/// - `422 Unprocessable Entity` - No field given, or an unknown frequency
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<ProfileResponse>> {
    if payload.notification_frequency.is_none() && payload.preferred_weather_tips.is_none() {
        warn!("Empty preferences update");
        return Err(AppError::Unprocessable("No preference to update."));
    }

    let updated = User::update_preferences(
        &state.db_pool,
        user.user_id,
        payload.notification_frequency,
        payload.preferred_weather_tips,
    )
    .await?
    .ok_or(AppError::NotFound("User not found."))?;

    info!(
        notification_frequency = ?updated.notification_frequency,
        preferred_weather_tips = updated.preferred_weather_tips,
        "Preferences updated"
    );
    Ok(Json(updated.into()))
}

/// Lists the notifications recorded for the user, newest first.
///
/// GET /users/me/notifications
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = Notification::list_for_user(&state.db_pool, user.user_id).await?;
    Ok(Json(notifications))
}

/// Deletes the account and everything it owns.
///
/// DELETE /users/me
///
/// # Returns
///
/// - `200 OK` with the number of removed rows per table
/// - `404 Not Found` - User already removed
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<DeleteAccountResponse>> {
    let deleted = User::delete_with_owned_records(&state.db_pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found."))?;

    info!("Account deleted");
    Ok(Json(DeleteAccountResponse {
        message: "Account deleted successfully",
        deleted,
    }))
}
