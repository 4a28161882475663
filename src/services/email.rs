//! # Email Service
//!
//! This module provides email sending functionality with multiple implementations.
//! The service trait allows for easy testing and switching between different
//! email providers or mock implementations.
//!
//! ## Implementations
//!
//! - [`LogEmailer`] - Development/testing implementation that logs emails
//! - [`MailerSendEmailer`] - Production implementation using the MailerSend API
//!
//! ## Usage
//!
//! The email service is automatically configured based on the `APP_ENV` environment variable:
//! - **Production**: Uses `MailerSendEmailer` with the real email API
//! - **Development/Testing**: Uses `LogEmailer`

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that can occur during email operations
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// A display name plus address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    pub email: String,
    pub name: String,
}

impl Mailbox {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A fully prepared outbound message
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub reply_to: Option<Mailbox>,
}

/// Trait for email sending services
///
/// This trait provides a common interface for different email implementations,
/// allowing the application to switch between real email providers and mock
/// implementations for testing.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a prepared message.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::SendFailed`] if the email cannot be sent due to
    /// network issues, API errors, or other delivery problems.
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// Mock email service for development and testing
///
/// This implementation logs email details instead of sending real emails.
pub struct LogEmailer;

#[async_trait]
impl EmailService for LogEmailer {
    #[instrument(
        skip_all,
        fields(recipient = %message.recipient.email, subject = %message.subject)
    )]
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailError> {
        info!(
            sender = %message.sender.email,
            text_body = %message.text_body,
            "Mock email sent"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct MailerSendPayload<'a> {
    from: &'a Mailbox,
    to: [&'a Mailbox; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a Mailbox>,
}

impl<'a> From<&'a EmailMessage> for MailerSendPayload<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            from: &message.sender,
            to: [&message.recipient],
            subject: &message.subject,
            html: &message.html_body,
            text: &message.text_body,
            reply_to: message.reply_to.as_ref(),
        }
    }
}

/// Transactional email through the MailerSend HTTP API
///
/// # Configuration
///
/// Requires the following environment variables in production:
/// - `MAILERSEND_API_KEY` - API token
/// - `MAIL_API_URL` - Endpoint, defaults to `https://api.mailersend.com/v1/email`
#[derive(Debug)]
pub struct MailerSendEmailer {
    api_url: String,
    api_key: SecretString,
    http_client: reqwest::Client,
}

impl MailerSendEmailer {
    /// Creates a new MailerSend client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - URL of the send endpoint
    /// * `api_key` - Bearer token for the API
    pub fn new(api_url: String, api_key: SecretString) -> Self {
        info!(api_url = %api_url, "Initializing MailerSend email service");

        Self {
            api_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailService for MailerSendEmailer {
    #[instrument(
        skip_all,
        fields(
            recipient = %message.recipient.email,
            subject = %message.subject,
            sender = %message.sender.email
        )
    )]
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailError> {
        debug!("Sending HTTP request to email API");
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&MailerSendPayload::from(message))
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                info!(status = %res.status(), "Email accepted by MailerSend");
                Ok(())
            }
            Ok(res) => {
                let status = res.status();
                let error_body = res
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response body".to_string());

                error!(
                    status = %status,
                    error_body = %error_body,
                    "MailerSend API returned error"
                );

                Err(EmailError::SendFailed(format!(
                    "Email provider API error ({status}): {error_body}"
                )))
            }
            Err(e) => {
                error!(error = %e, "Network request to email API failed");
                Err(EmailError::SendFailed(format!("Network request error: {e}")))
            }
        }
    }
}
