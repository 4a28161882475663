//! # Advisory Orchestration
//!
//! Glue between the pure estimators, the weather provider and persistence:
//! weather tip lookups for a city, and the optimization report email that is
//! sent in the background after `/optimize_energy_usage_send_email` responds.

use std::sync::Arc;

use serde::Serialize;
use time::{Date, OffsetDateTime, Time};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, NotificationStatus, RealEstate, User, WeatherBasedRecommendation};
use crate::services::email::{EmailMessage, Mailbox};
use crate::services::notification::dispatch_email;
use crate::services::tips::{TemperatureBand, recommendation_tips};
use crate::utils::constant::OPTIMIZATION_EMAIL_SUBJECT;
use crate::utils::html::{generate_energy_report_html, generate_energy_report_text};
use crate::utils::static_object::{SENDER_EMAIL, SENDER_NAME};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Tips for a city on a given day
#[derive(Debug, Serialize)]
pub struct WeatherTips {
    pub city: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub temperature: f64,
    pub tips: Vec<&'static str>,
}

/// Looks up the current temperature for `city`, derives tips and stores them
/// as a weather based recommendation for `user_id`.
///
/// # Errors
///
/// [`AppError::NotFound`] when the weather provider has no data for the city.
#[instrument(skip(state))]
pub async fn weather_tips_for_city(
    state: &AppState,
    user_id: Uuid,
    city: &str,
    date: Date,
) -> AppResult<WeatherTips> {
    let Some(temperature) = state.weather_service.current_temperature(city).await else {
        warn!("No weather data for city");
        return Err(AppError::NotFound("City not found or weather API error."));
    };

    let tips = recommendation_tips(temperature, OffsetDateTime::now_utc().time());
    let band = TemperatureBand::from_celsius(temperature);

    WeatherBasedRecommendation::insert(
        &state.db_pool,
        user_id,
        &format!("Recommended action for weather in {city}"),
        &format!("{temperature}°C ({})", band.as_str()),
        &tips,
    )
    .await?;

    debug!(temperature, tip_count = tips.len(), "Weather tips stored");
    Ok(WeatherTips {
        city: city.to_string(),
        date,
        temperature,
        tips,
    })
}

/// Everything the optimization email needs, detached from the request
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub preferred_weather_tips: bool,
    pub location: Option<String>,
    pub square_area: i32,
    pub insulation_quality: String,
    pub year_built: i32,
    pub energy_usage: f64,
    pub estimated_cost: f64,
}

impl OptimizationReport {
    pub fn new(user: &User, real_estate: &RealEstate, energy_usage: f64, estimated_cost: f64) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            preferred_weather_tips: user.preferred_weather_tips,
            location: real_estate.location.clone(),
            square_area: real_estate.square_area,
            insulation_quality: real_estate.insulation_quality.clone(),
            year_built: real_estate.year_built,
            energy_usage,
            estimated_cost,
        }
    }
}

/// Builds the report email for a temperature reading taken at `now`.
///
/// Tips are included only when a reading exists and the user wants them.
pub fn build_report_email(report: &OptimizationReport, temperature: Option<f64>, now: Time) -> EmailMessage {
    let tips = match temperature {
        Some(t) if report.preferred_weather_tips => recommendation_tips(t, now),
        _ => Vec::new(),
    };

    EmailMessage {
        sender: Mailbox::new(SENDER_NAME.as_str(), SENDER_EMAIL.as_str()),
        recipient: Mailbox::new(report.full_name.as_str(), report.email.as_str()),
        subject: OPTIMIZATION_EMAIL_SUBJECT.to_string(),
        html_body: generate_energy_report_html(report, temperature, &tips),
        text_body: generate_energy_report_text(report, temperature, &tips),
        reply_to: None,
    }
}

/// Fetches the weather for the property, renders the report and dispatches it.
#[instrument(skip_all, fields(user_id = %report.user_id))]
pub async fn send_optimization_email(
    state: &AppState,
    report: &OptimizationReport,
) -> AppResult<NotificationStatus> {
    let temperature = match report.location.as_deref() {
        Some(city) => state.weather_service.current_temperature(city).await,
        None => {
            debug!("Property has no location, skipping weather lookup");
            None
        }
    };

    let message = build_report_email(report, temperature, OffsetDateTime::now_utc().time());
    dispatch_email(
        &state.db_pool,
        state.email_service.as_ref(),
        report.user_id,
        &message,
    )
    .await
}

/// Runs [`send_optimization_email`] on a detached task.
pub fn spawn_optimization_email(state: Arc<AppState>, report: OptimizationReport) {
    tokio::spawn(async move {
        match send_optimization_email(&state, &report).await {
            Ok(status) => info!(user_id = %report.user_id, ?status, "Optimization email processed"),
            Err(e) => error!(user_id = %report.user_id, error = %e, "Optimization email could not be recorded"),
        }
    });
}
