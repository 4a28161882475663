//! # Energy Optimization Handler
//!
//! Estimates usage and cost for one of the user's properties, stores the
//! estimate as a recommendation, and sends the report email after the
//! response has been returned.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, NewRecommendation, RealEstate, Recommendation};
use crate::services::advisory::{OptimizationReport, spawn_optimization_email};
use crate::services::energy::{estimate_daily_cost, estimate_energy_usage, round3};
use crate::utils::constant::ENERGY_OPTIMIZATION_CATEGORY;

#[derive(Debug, Deserialize)]
pub struct OptimizeQuery {
    pub real_estate_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub real_estate_id: Uuid,
    pub square_area: i32,
    pub insulation_quality: String,
    pub year_built: i32,
    pub energy_source: String,
    pub estimated_energy_usage_kwh: f64,
    pub estimated_daily_cost_eur: f64,
    pub message: String,
}

/// Computes the energy estimate and schedules the report email.
///
/// POST /optimize_energy_usage_send_email?real_estate_id=...
///
/// Without `real_estate_id` the user's first registered property is used.
///
/// # Returns
///
/// - `200 OK` with [`OptimizationResponse`]; the email is sent afterwards
/// - `404 Not Found` - The user has no (matching) property
/// - `422 Unprocessable Entity` - `real_estate_id` is not a UUID
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn optimize_energy_usage(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<OptimizeQuery>, QueryRejection>,
) -> AppResult<Json<OptimizationResponse>> {
    let Query(query) = query?;
    let owner = user.account;

    let real_estate = match query.real_estate_id {
        Some(id) => RealEstate::find_owned(&state.db_pool, id, owner.id).await?,
        None => RealEstate::first_owned(&state.db_pool, owner.id).await?,
    };
    let Some(real_estate) = real_estate else {
        warn!(requested = ?query.real_estate_id, "No property to optimize");
        return Err(AppError::NotFound("No real estate found."));
    };

    let current_year = OffsetDateTime::now_utc().year();
    let energy_usage = estimate_energy_usage(
        real_estate.square_area,
        &real_estate.insulation_quality,
        real_estate.year_built,
        current_year,
    );
    let estimated_cost = estimate_daily_cost(energy_usage, real_estate.energy_source.as_deref());
    debug!(energy_usage, estimated_cost, "Energy estimate computed");

    Recommendation::insert_for_owned_property(
        &state.db_pool,
        owner.id,
        real_estate.id,
        &NewRecommendation {
            category: ENERGY_OPTIMIZATION_CATEGORY,
            message: &format!("Estimated daily cost: {estimated_cost:.2} €."),
            estimated_savings: Some(estimated_cost),
        },
    )
    .await?;

    spawn_optimization_email(
        Arc::clone(&state),
        OptimizationReport::new(&owner, &real_estate, energy_usage, estimated_cost),
    );
    info!(real_estate_id = %real_estate.id, "Optimization email scheduled");

    Ok(Json(OptimizationResponse {
        real_estate_id: real_estate.id,
        square_area: real_estate.square_area,
        energy_source: real_estate
            .energy_source
            .unwrap_or_else(|| "electricity".to_string()),
        insulation_quality: real_estate.insulation_quality,
        year_built: real_estate.year_built,
        estimated_energy_usage_kwh: round3(energy_usage),
        estimated_daily_cost_eur: round3(estimated_cost),
        message: "Email with energy optimization details will be sent shortly.".to_string(),
    }))
}
