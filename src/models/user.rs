//! # Users
//!
//! The `users` table and the persistence operations around it, including the
//! explicit cascading delete of everything a user owns.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

/// How often a user wants to receive advisory notifications.
///
/// Corresponds to the PostgreSQL `notification_frequency` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "notification_frequency", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Seasonally,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub notification_frequency: NotificationFrequency,
    pub preferred_weather_tips: bool,
    pub created_at: OffsetDateTime,
}

/// Values for a new `users` row; the password is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub password_hash: &'a str,
}

/// Row counts removed by [`User::delete_with_owned_records`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedRecords {
    pub weather_based_recommendations: u64,
    pub notifications: u64,
    pub recommendations: u64,
    pub real_estates: u64,
}

impl User {
    pub async fn find_by_email(db_pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, phone_number,
                   notification_frequency, preferred_weather_tips, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db_pool)
        .await
    }

    pub async fn email_exists(db_pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(db_pool)
            .await
    }

    pub async fn phone_number_exists(db_pool: &PgPool, phone_number: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)")
            .bind(phone_number)
            .fetch_one(db_pool)
            .await
    }

    /// Inserts a user and returns the new id.
    pub async fn insert(db_pool: &PgPool, new_user: &NewUser<'_>) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (full_name, email, phone_number, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new_user.full_name)
        .bind(new_user.email)
        .bind(new_user.phone_number)
        .bind(new_user.password_hash)
        .fetch_one(db_pool)
        .await
    }

    /// Updates the given preferences, leaving `None` fields untouched.
    pub async fn update_preferences(
        db_pool: &PgPool,
        user_id: Uuid,
        notification_frequency: Option<NotificationFrequency>,
        preferred_weather_tips: Option<bool>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET notification_frequency = COALESCE($2, notification_frequency),
                preferred_weather_tips = COALESCE($3, preferred_weather_tips)
            WHERE id = $1
            RETURNING id, full_name, email, password_hash, phone_number,
                      notification_frequency, preferred_weather_tips, created_at
            "#,
        )
        .bind(user_id)
        .bind(notification_frequency)
        .bind(preferred_weather_tips)
        .fetch_optional(db_pool)
        .await
    }

    /// Deletes the user together with every row that references it.
    ///
    /// Children are removed before their parents inside one transaction, so
    /// either the whole account disappears or nothing does. Returns `None` when
    /// the user does not exist.
    #[instrument(skip(db_pool))]
    pub async fn delete_with_owned_records(
        db_pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<DeletedRecords>, sqlx::Error> {
        let mut tx = db_pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let weather_based_recommendations =
            sqlx::query("DELETE FROM weather_based_recommendations WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        let notifications = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // Recommendations can reference this user's properties under another
        // user id only if the ownership check was bypassed; remove those too.
        let recommendations = sqlx::query(
            r#"
            DELETE FROM recommendations
            WHERE user_id = $1
               OR real_estate_id IN (SELECT id FROM real_estates WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let real_estates = sqlx::query("DELETE FROM real_estates WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = DeletedRecords {
            weather_based_recommendations,
            notifications,
            recommendations,
            real_estates,
        };
        info!(?deleted, "User and owned records deleted");
        Ok(Some(deleted))
    }
}
