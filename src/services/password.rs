//! # Password Hashing
//!
//! bcrypt hashing and verification. Both operations are CPU-bound, so they run
//! on tokio's blocking pool instead of the request task.

use thiserror::Error;
use tokio::task;
use tracing::instrument;

use crate::utils::static_object::BCRYPT_COST;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] task::JoinError),
}

/// Hashes `password` with the configured bcrypt cost.
#[instrument(skip_all)]
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    hash_password_with_cost(password, *BCRYPT_COST).await
}

pub async fn hash_password_with_cost(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Checks `password` against a stored bcrypt hash.
#[instrument(skip_all)]
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, PasswordError> {
    let matches = task::spawn_blocking(move || bcrypt::verify(password, &password_hash)).await??;
    Ok(matches)
}
