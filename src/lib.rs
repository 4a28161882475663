//! # Energy Advisor - Real Estate Energy Advisory Backend
//!
//! ## Modules
//!
//! - [`error`] - Central error type and its HTTP mapping
//! - [`handlers`] - HTTP request handlers for various endpoints
//! - [`middleware`] - Bearer token authentication
//! - [`models`] - Persisted entities and shared application state
//! - [`services`] - Business logic services (estimation, email, weather, JWT, etc.)
//! - [`utils`] - Utility functions and constants

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
};
use secrecy::{ExposeSecret, SecretSlice, SecretString};
use sqlx::PgPool;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::handlers::{
    create_real_estate, delete_account, get_profile, health_check, list_notifications,
    list_real_estates, login, optimize_energy_usage, real_estate_tips, register, root,
    update_preferences, weather_tips,
};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::services::email::{EmailService, LogEmailer, MailerSendEmailer};
use crate::services::jwt::JwtService;
use crate::services::scheduler::CleanupService;
use crate::services::weather::{OfflineWeather, OpenWeatherClient, WeatherService};
use crate::utils::{
    secret::get_secret,
    static_object::{ACCESS_TOKEN_EXPIRE_MINUTES, MAIL_API_URL, PUBLIC_DIR, WEATHER_API_URL},
};

/// Creates an Axum router with services configured from the environment and
/// starts the weekly cleanup task.
///
/// # Environment Variables
///
/// - `APP_ENV` - "production" uses MailerSendEmailer, otherwise uses LogEmailer (mock)
/// - `MAILERSEND_API_KEY` - Required in production for the email provider
/// - `WEATHER_API_KEY` - Optional; without it every weather lookup has no data
/// - `JWT_SECRET` - Required for JWT token signing and validation
pub fn app(db_pool: PgPool) -> Router {
    let app_env = env::var("APP_ENV")
        .expect("Env variable `APP_ENV` should be set")
        .to_ascii_lowercase();

    let email_service: Arc<dyn EmailService> = if app_env == "production" {
        info!("Running in production mode with [MailerSendEmailer]");
        let api_key = get_secret("MAILERSEND_API_KEY")
            .map(SecretString::from)
            .expect("Secret `MAILERSEND_API_KEY` should be set in production");
        Arc::new(MailerSendEmailer::new(MAIL_API_URL.clone(), api_key))
    } else {
        info!("Running in development mode with [LogEmailer (Mock)]");
        Arc::new(LogEmailer)
    };

    let weather_api_key = get_secret("WEATHER_API_KEY").map(SecretString::from);
    let weather_service: Arc<dyn WeatherService> = match weather_api_key {
        Some(api_key) => Arc::new(OpenWeatherClient::new(WEATHER_API_URL.clone(), api_key)),
        None => {
            warn!("WEATHER_API_KEY not set, weather lookups are disabled");
            Arc::new(OfflineWeather)
        }
    };

    CleanupService::spawn_cleanup_task(db_pool.clone());

    app_with_services(db_pool, email_service, weather_service)
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `db_pool` - PostgreSQL database connection pool
/// * `email_service` - Outbound email implementation
/// * `weather_service` - Temperature provider
///
/// # Returns
///
/// A configured Axum router with all application routes and middleware
pub fn app_with_services(
    db_pool: PgPool,
    email_service: Arc<dyn EmailService>,
    weather_service: Arc<dyn WeatherService>,
) -> Router {
    let jwt_key = SecretSlice::from(
        get_secret("JWT_SECRET")
            .expect("Secret `JWT_SECRET` should be set")
            .into_bytes(),
    );

    let jwt_service = JwtService::from_secret(
        jwt_key.expose_secret(),
        Duration::from_secs(*ACCESS_TOKEN_EXPIRE_MINUTES * 60),
    );

    let state = Arc::new(AppState::new(
        db_pool,
        email_service,
        weather_service,
        jwt_service,
    ));

    let protected_routes = Router::new()
        .route("/users/me", get(get_profile))
        .route("/users/me", delete(delete_account))
        .route("/users/me/preferences", patch(update_preferences))
        .route("/users/me/notifications", get(list_notifications))
        .route("/real-estates", post(create_real_estate))
        .route("/real-estates", get(list_real_estates))
        .route("/real-estates/{id}/tips", get(real_estate_tips))
        .route("/weather-tips", get(weather_tips))
        .route(
            "/optimize_energy_usage_send_email",
            post(optimize_energy_usage),
        )
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health-check", get(health_check))
        .route("/register", post(register))
        .route("/token", post(login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/public", ServeDir::new(PUBLIC_DIR.as_str()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
