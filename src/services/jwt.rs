//! # JWT Service
//!
//! This module provides JSON Web Token (JWT) functionality for user authentication.
//! Tokens are HS256-signed, carry the user's email as subject, and expire after a
//! configurable number of minutes.
//!
//! ## Security
//!
//! - The signing key is read once at startup and never logged
//! - Expired tokens are reported separately from malformed or forged ones

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Errors that can occur during JWT operations
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Service for issuing and validating access tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: Duration,
    validation: Validation,
}

impl JwtService {
    /// Creates a new JWT service.
    ///
    /// # Arguments
    ///
    /// * `encoding_key` - Key used for signing JWT tokens
    /// * `decoding_key` - Key used for verifying JWT tokens
    /// * `access_token_expiry` - Lifetime of issued access tokens
    pub fn new(
        encoding_key: EncodingKey,
        decoding_key: DecodingKey,
        access_token_expiry: Duration,
    ) -> Self {
        Self {
            encoding_key,
            decoding_key,
            access_token_expiry,
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Builds a service from a shared secret.
    pub fn from_secret(secret: &[u8], access_token_expiry: Duration) -> Self {
        Self::new(
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
            access_token_expiry,
        )
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn expires_in(&self) -> u64 {
        self.access_token_expiry.as_secs()
    }

    /// Issues an access token for the given email with the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::EncodingError`] if signing fails.
    #[instrument(skip_all)]
    pub fn create_access_token(&self, email: &str) -> Result<String, JwtError> {
        let ttl = time::Duration::try_from(self.access_token_expiry)
            .unwrap_or(time::Duration::MAX);
        self.create_token_with_ttl(email, ttl)
    }

    /// Issues a token whose expiry is `ttl` from now. A negative `ttl` yields an
    /// already expired token.
    pub fn create_token_with_ttl(&self, email: &str, ttl: time::Duration) -> Result<String, JwtError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let exp = now.saturating_add_signed(ttl.whole_seconds());
        let claims = Claims {
            sub: email.to_string(),
            exp,
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        trace!("Access token created");
        Ok(token)
    }

    /// Validates an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenExpired`] - Token has expired
    /// - [`JwtError::InvalidToken`] - Token is malformed, forged, or missing claims
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => {
                trace!(subject = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &ErrorKind::ExpiredSignature => {
                debug!("Access token expired");
                Err(JwtError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(JwtError::InvalidToken)
            }
        }
    }
}
