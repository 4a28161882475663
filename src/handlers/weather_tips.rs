//! # Weather Tips Handler

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing::{debug, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::AppState;
use crate::services::advisory::{WeatherTips, weather_tips_for_city};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
    pub date: Option<String>,
}

/// Parses an optional `YYYY-MM-DD` query value, defaulting to today (UTC).
pub(crate) fn parse_date(date: Option<&str>) -> AppResult<Date> {
    match date {
        None => Ok(OffsetDateTime::now_utc().date()),
        Some(raw) => Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|e| {
            warn!(date = raw, error = %e, "Malformed date parameter");
            AppError::Unprocessable("Invalid date format, expected YYYY-MM-DD.")
        }),
    }
}

/// Weather tips for an arbitrary city.
///
/// GET /weather-tips?city=...&date=YYYY-MM-DD
///
/// # Returns
///
/// - `200 OK` - `{city, date, temperature, tips}`
/// - `404 Not Found` - No weather data for the city
/// - `422 Unprocessable Entity` - Missing or blank city, or malformed date
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn weather_tips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> AppResult<Json<WeatherTips>> {
    let Query(query) = query?;
    debug!(city = %query.city, "Looking up city tips");
    let city = query.city.trim();
    if city.is_empty() {
        return Err(AppError::Unprocessable("City must not be blank."));
    }
    let date = parse_date(query.date.as_deref())?;

    let tips = weather_tips_for_city(&state, user.user_id, city, date).await?;
    Ok(Json(tips))
}
