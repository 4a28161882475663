use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A snapshot of the tips shown to a user for a given weather reading
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeatherBasedRecommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub temperature_condition: String,
    /// Tips joined with newlines
    pub weather_tips: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl WeatherBasedRecommendation {
    pub async fn insert(
        db_pool: &PgPool,
        user_id: Uuid,
        message: &str,
        temperature_condition: &str,
        tips: &[&str],
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, WeatherBasedRecommendation>(
            r#"
            INSERT INTO weather_based_recommendations
                (user_id, message, temperature_condition, weather_tips)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, message, temperature_condition, weather_tips, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(temperature_condition)
        .bind(tips.join("\n"))
        .fetch_one(db_pool)
        .await
    }
}
