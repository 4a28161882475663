use std::env;
use std::sync::LazyLock;

use tracing::error;

use super::constant::DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES;

pub static ACCESS_TOKEN_EXPIRE_MINUTES: LazyLock<u64> = LazyLock::new(|| {
    env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
        .ok()
        .and_then(|val| val.parse().ok())
        .filter(|minutes| *minutes > 0)
        .unwrap_or_else(|| {
            error!(
                "Invalid or missing ACCESS_TOKEN_EXPIRE_MINUTES env var, using fallback {DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES}"
            );
            DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES
        })
});

/// bcrypt work factor, clamped to the range the algorithm accepts
pub static BCRYPT_COST: LazyLock<u32> = LazyLock::new(|| {
    env::var("BCRYPT_COST")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .filter(|cost| (4..=31).contains(cost))
        .unwrap_or_else(|| {
            error!(
                "Invalid or missing BCRYPT_COST env var, using fallback {}",
                bcrypt::DEFAULT_COST
            );
            bcrypt::DEFAULT_COST
        })
});

pub static SENDER_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SENDER_NAME").unwrap_or_else(|_| "Efficient Energy Advisory".to_string())
});

pub static SENDER_EMAIL: LazyLock<String> = LazyLock::new(|| {
    env::var("SENDER_EMAIL").unwrap_or_else(|_| {
        error!("Missing SENDER_EMAIL env var, using fallback 'no-reply@localhost'");
        "no-reply@localhost".to_string()
    })
});

pub static MAIL_API_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("MAIL_API_URL").unwrap_or_else(|_| "https://api.mailersend.com/v1/email".to_string())
});

pub static WEATHER_API_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("WEATHER_API_URL")
        .unwrap_or_else(|_| "http://api.openweathermap.org/data/2.5/weather".to_string())
});

pub static PUBLIC_DIR: LazyLock<String> =
    LazyLock::new(|| env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string()));
