use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A property registered by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RealEstate {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Floor area in m², always positive
    pub square_area: i32,
    pub real_estate_type: String,
    /// Always after 1800
    pub year_built: i32,
    pub insulation_quality: String,
    pub energy_source: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewRealEstate<'a> {
    pub square_area: i32,
    pub real_estate_type: &'a str,
    pub year_built: i32,
    pub insulation_quality: &'a str,
    pub energy_source: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl RealEstate {
    /// Inserts a property owned by `user_id` and returns its id.
    pub async fn insert(
        db_pool: &PgPool,
        user_id: Uuid,
        new: &NewRealEstate<'_>,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO real_estates
                (user_id, square_area, real_estate_type, year_built,
                 insulation_quality, energy_source, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(new.square_area)
        .bind(new.real_estate_type)
        .bind(new.year_built)
        .bind(new.insulation_quality)
        .bind(new.energy_source)
        .bind(new.location)
        .fetch_one(db_pool)
        .await
    }

    /// Fetches a property only if it belongs to `user_id`.
    pub async fn find_owned(
        db_pool: &PgPool,
        real_estate_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RealEstate>(
            r#"
            SELECT id, user_id, square_area, real_estate_type, year_built,
                   insulation_quality, energy_source, location, created_at
            FROM real_estates
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(real_estate_id)
        .bind(user_id)
        .fetch_optional(db_pool)
        .await
    }

    /// The user's earliest registered property.
    pub async fn first_owned(db_pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RealEstate>(
            r#"
            SELECT id, user_id, square_area, real_estate_type, year_built,
                   insulation_quality, energy_source, location, created_at
            FROM real_estates
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db_pool)
        .await
    }

    pub async fn list_owned(db_pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, RealEstate>(
            r#"
            SELECT id, user_id, square_area, real_estate_type, year_built,
                   insulation_quality, energy_source, location, created_at
            FROM real_estates
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db_pool)
        .await
    }
}
