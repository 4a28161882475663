//! # Real Estate Handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::weather_tips::{DateQuery, parse_date};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, NewRealEstate, RealEstate};
use crate::services::advisory::{WeatherTips, weather_tips_for_city};
use crate::utils::validator::{validate_not_blank, validate_not_future_year};

/// Request payload for registering a property
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRealEstateRequest {
    #[validate(range(min = 1, message = "Square area must be greater than 0."))]
    pub square_area: i32,
    #[validate(custom(function = "validate_not_blank"), length(max = 50))]
    pub real_estate_type: String,
    #[validate(
        range(min = 1801, message = "Year built must be after 1800."),
        custom(function = "validate_not_future_year")
    )]
    pub year_built: i32,
    #[validate(custom(function = "validate_not_blank"), length(max = 50))]
    pub insulation_quality: String,
    #[validate(length(max = 50))]
    pub energy_source: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRealEstateResponse {
    pub message: String,
    pub property_id: Uuid,
}

/// Blank optional text is stored as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Registers a property for the authenticated user.
///
/// POST /real-estates
///
/// # Returns
///
/// - `201 Created` - `{message, property_id}`
/// - `422 Unprocessable Entity` - Payload failed validation
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn create_real_estate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateRealEstateRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .inspect_err(|_| warn!("Invalid real estate payload"))?;

    let property_id = RealEstate::insert(
        &state.db_pool,
        user.user_id,
        &NewRealEstate {
            square_area: payload.square_area,
            real_estate_type: payload.real_estate_type.trim(),
            year_built: payload.year_built,
            insulation_quality: payload.insulation_quality.trim(),
            energy_source: non_blank(payload.energy_source.as_deref()),
            location: non_blank(payload.location.as_deref()),
        },
    )
    .await?;

    info!(%property_id, "Property registered");
    Ok((
        StatusCode::CREATED,
        Json(CreateRealEstateResponse {
            message: "Property created successfully".to_string(),
            property_id,
        }),
    ))
}

/// Lists the authenticated user's properties, oldest first.
///
/// GET /real-estates
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn list_real_estates(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Vec<RealEstate>>> {
    let real_estates = RealEstate::list_owned(&state.db_pool, user.user_id).await?;
    debug!(count = real_estates.len(), "Properties listed");
    Ok(Json(real_estates))
}

/// Weather tips for the location of one of the user's properties.
///
/// GET /real-estates/{id}/tips?date=YYYY-MM-DD
///
/// # Returns
///
/// - `200 OK` - `{city, date, temperature, tips}`
/// - `404 Not Found` - Property missing, owned by someone else, without a
///   location, or no weather data for its location
/// - `422 Unprocessable Entity` - Malformed property id or date
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn real_estate_tips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> AppResult<Json<WeatherTips>> {
    let Path(real_estate_id) = path?;
    let Query(query) = query?;
    let date = parse_date(query.date.as_deref())?;
    debug!(%real_estate_id, "Looking up property tips");

    let real_estate = RealEstate::find_owned(&state.db_pool, real_estate_id, user.user_id)
        .await?
        .ok_or_else(|| {
            warn!("Property not found or not owned by user");
            AppError::NotFound("Real estate not found or access denied.")
        })?;

    let Some(city) = real_estate.location.as_deref() else {
        warn!("Property has no location");
        return Err(AppError::NotFound("Real estate has no location."));
    };

    let tips = weather_tips_for_city(&state, user.user_id, city, date).await?;
    Ok(Json(tips))
}
