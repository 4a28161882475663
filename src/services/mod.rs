//! # Business Logic Services
//!
//! This module contains the core business logic services for the energy advisor.
//! Services encapsulate domain-specific functionality and provide clean interfaces
//! for use by HTTP handlers and background tasks.
//!
//! ## Available Services
//!
//! - **Advisory** (`advisory`) - Weather tip lookups and the optimization report email
//! - **Email** (`email`) - Email delivery service with multiple implementations
//! - **Energy** (`energy`) - Usage and cost estimation
//! - **JWT** (`jwt`) - JSON Web Token creation and validation
//! - **Notification** (`notification`) - Recorded email dispatch
//! - **Password** (`password`) - bcrypt hashing off the async runtime
//! - **Scheduler** (`scheduler`) - Weekly purge of expired records
//! - **Tips** (`tips`) - Temperature based energy saving tips
//! - **Weather** (`weather`) - Current temperature lookups

pub mod advisory;
pub mod email;
pub mod energy;
pub mod jwt;
pub mod notification;
pub mod password;
pub mod scheduler;
pub mod tips;
pub mod weather;
