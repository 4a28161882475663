use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Delivery state of an outbound message.
///
/// `Pending` is written before the send attempt and moves to `Sent` or
/// `Failed` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub status: NotificationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Notification {
    pub async fn insert_pending(
        db_pool: &PgPool,
        user_id: Uuid,
        message: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, message, status)
            VALUES ($1, $2, 'pending')
            RETURNING id, user_id, message, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .fetch_one(db_pool)
        .await
    }

    pub async fn update_status(
        db_pool: &PgPool,
        notification_id: Uuid,
        status: NotificationStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET status = $2 WHERE id = $1")
            .bind(notification_id)
            .bind(status)
            .execute(db_pool)
            .await?;
        Ok(())
    }

    /// Newest first.
    pub async fn list_for_user(db_pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, message, status, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db_pool)
        .await
    }
}
