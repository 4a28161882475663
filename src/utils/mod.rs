//! # Utility Modules
//!
//! This module contains utility functions, constants, and validators used
//! throughout the advisory service.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Application-wide configuration constants
//! - **HTML** (`html`) - Email body rendering
//! - **Secrets** (`secret`) - Secret lookup from env vars or mounted files
//! - **Static objects** (`static_object`) - Lazily read, env-driven settings
//! - **Validators** (`validator`) - Custom field validators for request payloads

pub mod constant;
pub mod html;
pub mod secret;
pub mod static_object;
pub mod validator;
