//! # Notification Dispatch
//!
//! Every outbound email leaves a `notifications` row behind. The row is written
//! as `pending` before the provider is called and settles on `sent` or `failed`
//! afterwards; a failed send is terminal and never retried.

use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Notification, NotificationStatus};
use crate::services::email::{EmailMessage, EmailService};

/// Records and sends `message` on behalf of `user_id`.
///
/// # Returns
///
/// The final status written to the notification row. Provider failures are
/// recorded as [`NotificationStatus::Failed`] rather than returned as errors.
///
/// # Errors
///
/// Only database failures are propagated. If the pending row cannot be
/// written the email is not sent.
#[instrument(
    skip_all,
    fields(%user_id, recipient = %message.recipient.email)
)]
pub async fn dispatch_email(
    db_pool: &PgPool,
    email_service: &dyn EmailService,
    user_id: Uuid,
    message: &EmailMessage,
) -> AppResult<NotificationStatus> {
    let notification = Notification::insert_pending(
        db_pool,
        user_id,
        &format!("Email scheduled for {}", message.recipient.email),
    )
    .await?;

    let status = match email_service.send_email(message).await {
        Ok(()) => {
            info!(notification_id = %notification.id, "Email sent");
            NotificationStatus::Sent
        }
        Err(e) => {
            error!(notification_id = %notification.id, error = %e, "Email delivery failed");
            NotificationStatus::Failed
        }
    };

    Notification::update_status(db_pool, notification.id, status).await?;
    Ok(status)
}
