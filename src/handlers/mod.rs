//! # HTTP Request Handlers
//!
//! This module contains all HTTP request handlers for the energy advisor.
//! Each handler is responsible for processing specific HTTP requests and returning
//! appropriate responses.
//!
//! ## Available Handlers
//!
//! - **Authentication** (`auth`) - Registration and JWT login
//! - **Energy** (`energy`) - Usage/cost estimate and the report email
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Profile** (`profile`) - Profile, preferences, notifications and account deletion
//! - **Real Estate** (`real_estate`) - Property registration and per-property tips
//! - **Weather Tips** (`weather_tips`) - Tips for an arbitrary city

mod auth;
mod energy;
mod health_check;
mod profile;
mod real_estate;
mod weather_tips;

pub use auth::*;
pub use energy::*;
pub use health_check::*;
pub use profile::*;
pub use real_estate::*;
pub use weather_tips::*;
