use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub real_estate_id: Uuid,
    pub category: String,
    pub message: String,
    pub estimated_savings: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewRecommendation<'a> {
    pub category: &'a str,
    pub message: &'a str,
    pub estimated_savings: Option<f64>,
}

impl Recommendation {
    /// Stores a recommendation for a property owned by `user_id`.
    ///
    /// The ownership check and the insert share one transaction; the property
    /// row is share-locked so it cannot be deleted in between.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the property does not exist or belongs to
    /// another user.
    pub async fn insert_for_owned_property(
        db_pool: &PgPool,
        user_id: Uuid,
        real_estate_id: Uuid,
        new: &NewRecommendation<'_>,
    ) -> AppResult<Self> {
        let mut tx = db_pool.begin().await?;

        let owned = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM real_estates WHERE id = $1 AND user_id = $2 FOR SHARE",
        )
        .bind(real_estate_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Err(AppError::NotFound("Real estate not found or access denied."));
        }

        let recommendation = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (user_id, real_estate_id, category, message, estimated_savings)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, real_estate_id, category, message, estimated_savings, created_at
            "#,
        )
        .bind(user_id)
        .bind(real_estate_id)
        .bind(new.category)
        .bind(new.message)
        .bind(new.estimated_savings)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(recommendation)
    }
}
