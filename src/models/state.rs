use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::services::{email::EmailService, jwt::JwtService, weather::WeatherService};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The PostgreSQL database connection pool.
    pub db_pool: PgPool,
    /// Outbound email delivery.
    pub email_service: Arc<dyn EmailService>,
    /// Current-temperature lookups.
    pub weather_service: Arc<dyn WeatherService>,
    /// JWT service for token generation and validation.
    pub jwt_service: JwtService,
}

impl AppState {
    /// Creates a new application state with the provided services.
    ///
    /// # Arguments
    ///
    /// * `db_pool` - PostgreSQL database connection pool
    /// * `email_service` - Service for sending report emails
    /// * `weather_service` - Service for temperature lookups
    /// * `jwt_service` - Service for JWT token operations
    pub fn new(
        db_pool: PgPool,
        email_service: Arc<dyn EmailService>,
        weather_service: Arc<dyn WeatherService>,
        jwt_service: JwtService,
    ) -> Self {
        info!("Initializing application state");

        Self {
            db_pool,
            email_service,
            weather_service,
            jwt_service,
        }
    }
}
