#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use energy_advisor::{
    handlers::TokenResponse,
    services::{
        email::{EmailError, EmailMessage, EmailService},
        weather::WeatherService,
    },
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tokio::net::TcpListener;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "SecurePass1";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("energy_advisor=debug")
            .with_test_writer()
            .init();
    });
}

/// A mock email service that stores sent emails for testing purposes.
/// This is ideal for integration tests as it doesn't produce console output.
#[derive(Debug, Default)]
pub struct MockEmailer {
    sent_emails: Mutex<Vec<EmailMessage>>,
}

impl MockEmailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all sent emails for testing verification
    pub fn get_sent_emails(&self) -> Vec<EmailMessage> {
        self.sent_emails.lock().unwrap().clone()
    }

    /// Get the count of sent emails
    pub fn sent_count(&self) -> usize {
        self.sent_emails.lock().unwrap().len()
    }

    /// Get the last sent email
    pub fn last_sent_email(&self) -> Option<EmailMessage> {
        self.sent_emails.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EmailService for MockEmailer {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailError> {
        self.sent_emails.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Rejects every message, like a provider outage
pub struct FailingEmailer;

#[async_trait]
impl EmailService for FailingEmailer {
    async fn send_email(&self, _message: &EmailMessage) -> Result<(), EmailError> {
        Err(EmailError::SendFailed("provider unavailable".to_string()))
    }
}

/// Fixed temperatures per city; unknown cities have no data
pub struct MockWeather {
    temperatures: HashMap<String, f64>,
}

impl Default for MockWeather {
    fn default() -> Self {
        let temperatures = [("Vienna", 21.5), ("Dubai", 38.0), ("Oslo", 4.0)]
            .into_iter()
            .map(|(city, t)| (city.to_string(), t))
            .collect();
        Self { temperatures }
    }
}

#[async_trait]
impl WeatherService for MockWeather {
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        self.temperatures.get(city).copied()
    }
}

/// Spawns the application with a [`MockEmailer`] and [`MockWeather`].
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(test_db_pool: PgPool) -> (String, Arc<MockEmailer>) {
    let mock_emailer = Arc::new(MockEmailer::new());
    let address = spawn_app_with(
        test_db_pool,
        Arc::clone(&mock_emailer) as Arc<dyn EmailService>,
        Arc::new(MockWeather::default()),
    )
    .await;

    (address, mock_emailer)
}

/// Spawns the application with the given collaborators.
pub async fn spawn_app_with(
    test_db_pool: PgPool,
    email_service: Arc<dyn EmailService>,
    weather_service: Arc<dyn WeatherService>,
) -> String {
    dotenvy::from_filename_override("tests/data/.test.env").unwrap();
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = energy_advisor::app_with_services(test_db_pool, email_service, weather_service);
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    address
}

pub fn registration_payload(email: &str, phone_number: &str) -> Value {
    json!({
        "full_name": "Test Owner",
        "email": email,
        "phone_number": phone_number,
        "password": TEST_PASSWORD,
        "confirm_password": TEST_PASSWORD,
    })
}

pub async fn register_user(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    phone_number: &str,
) -> reqwest::Response {
    client
        .post(format!("{address}/register"))
        .json(&registration_payload(email, phone_number))
        .send()
        .await
        .expect("Failed to register")
}

pub async fn login(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    password: &str,
) -> TokenResponse {
    let response = client
        .post(format!("{address}/token"))
        .form(&[("username", email), ("password", password)])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    response.json().await.expect("Failed to parse response")
}

/// Helper function to register a user and return an access token
pub async fn get_access_token(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    phone_number: &str,
) -> String {
    let response = register_user(client, address, email, phone_number).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    login(client, address, email, TEST_PASSWORD)
        .await
        .access_token
        .expect("Login should return a token")
}

pub fn property_payload(location: Option<&str>) -> Value {
    json!({
        "square_area": 100,
        "real_estate_type": "apartment",
        "year_built": 2000,
        "insulation_quality": "good",
        "energy_source": "solar",
        "location": location,
    })
}

/// Registers a property and returns its id
pub async fn create_property(
    client: &reqwest::Client,
    address: &str,
    access_token: &str,
    payload: &Value,
) -> Uuid {
    let response = client
        .post(format!("{address}/real-estates"))
        .bearer_auth(access_token)
        .json(payload)
        .send()
        .await
        .expect("Failed to create property");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["property_id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Should return a property id")
}

/// Polls until the user's latest notification leaves `pending`, returning its status.
pub async fn wait_for_notification_status(pool: &PgPool, email: &str) -> String {
    for _ in 0..50 {
        let status = sqlx::query_scalar::<_, String>(
            r#"
            SELECT n.status::text
            FROM notifications n
            JOIN users u ON u.id = n.user_id
            WHERE u.email = $1
            ORDER BY n.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .unwrap();

        if let Some(status) = status
            && status != "pending"
        {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Notification for {email} never settled");
}
