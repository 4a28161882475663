//! # Application Constants
//!
//! This module defines configuration constants used throughout the advisory service.
//! These constants control timeouts, retention windows and the energy model defaults.

use std::time::Duration;

use time::{Time, macros::time};

/// Default lifetime of a JWT access token in minutes
///
/// Can be overridden with `ACCESS_TOKEN_EXPIRE_MINUTES`.
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: u64 = 180;

/// How long notifications and recommendations are kept before the cleanup sweep removes them
pub const RECORD_RETENTION: time::Duration = time::Duration::days(30);

/// Upper bound for a single weather API request
pub const WEATHER_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Baseline consumption in kWh per square metre per month
pub const BASELINE_CONSUMPTION_KWH: f64 = 4.0;

/// Number of days the monthly usage figure is spread over for the daily cost
pub const DAYS_PER_BILLING_PERIOD: f64 = 30.0;

/// Fixed clock time treated as sunrise by the tip generator
pub const SUNRISE: Time = time!(6:00);

/// Fixed clock time treated as sunset by the tip generator
pub const SUNSET: Time = time!(18:00);

pub const OPTIMIZATION_EMAIL_SUBJECT: &str = "Your Personalized Energy Optimization Update";

pub const ENERGY_OPTIMIZATION_CATEGORY: &str = "Energy Optimization";
