//! HTTP Mail API Implementation
//!
//! This module provides verification email delivery through a Mailgun-style
//! HTTP messages endpoint. It implements the Mailer trait for production
//! delivery.
//!
//! ## Features
//!
//! - Form-encoded message submission with API-key basic auth
//! - Automatic retry logic with exponential backoff
//! - Rate limiting handling
//! - Recipient address masking in logs

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use mo_core::services::otp::Mailer;
use mo_shared::config::MailConfig;
use mo_shared::utils::{is_valid_email, mask_email};

use crate::InfrastructureError;

use super::verification_message;

/// HTTP mailer configuration
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Messages endpoint URL of the mail provider
    pub api_url: String,
    /// API key used as the basic-auth password
    pub api_key: String,
    /// Sender address for the `from` field
    pub from_address: String,
    /// Subject line for verification emails
    pub subject: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl HttpMailerConfig {
    /// Build the configuration from the shared mail configuration
    ///
    /// Retry and timeout knobs come from `MAIL_MAX_RETRIES`,
    /// `MAIL_RETRY_DELAY_MS`, and `MAIL_REQUEST_TIMEOUT_SECS` when set.
    pub fn from_mail_config(config: &MailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_API_URL not set".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_API_KEY not set".to_string(),
            ));
        }
        if !is_valid_email(&config.from_address) {
            return Err(InfrastructureError::Config(format!(
                "MAIL_FROM is not a valid address: {}",
                config.from_address
            )));
        }

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            subject: config.subject.clone(),
            max_retries: std::env::var("MAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("MAIL_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// HTTP mail API implementation
pub struct HttpApiMailer {
    client: reqwest::Client,
    config: HttpMailerConfig,
}

impl HttpApiMailer {
    /// Create a new HTTP mailer
    pub fn new(config: HttpMailerConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        info!(
            "HTTP mailer initialized with from address: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    /// Send an email with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(to)
            );

            match self.post_message(to, body).await {
                Ok(message_id) => {
                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        "Failed to send email (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send email after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    // Client errors will not improve on retry
                    let error_msg = e.to_string();
                    if error_msg.contains("400") || error_msg.contains("401") {
                        return Err(InfrastructureError::Mail(format!(
                            "Invalid request: {}",
                            e
                        )));
                    }
                    if error_msg.contains("429") || error_msg.contains("rate") {
                        warn!("Rate limit detected, backing off for {:?}", delay);
                    }

                    // Wait before retrying with exponential backoff
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    /// Submit one message to the provider's messages endpoint
    async fn post_message(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let params = [
            ("from", self.config.from_address.as_str()),
            ("to", to),
            ("subject", self.config.subject.as_str()),
            ("text", body),
        ];

        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&params)
            .send()
            .await
            .map_err(|e| InfrastructureError::Mail(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Mail(format!(
                "Provider returned {}: {}",
                status, text
            )));
        }

        // Mailgun-style responses carry an `id` field; tolerate providers
        // that answer with a bare body
        let payload: serde_json::Value = response
            .json()
            .await
            .unwrap_or(serde_json::Value::Null);
        let message_id = payload
            .get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()));

        Ok(message_id)
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<String, String> {
        if !is_valid_email(email) {
            return Err(format!("Invalid email address: {}", mask_email(email)));
        }

        let body = verification_message(code, valid_for);
        self.send_with_retry(email, &body)
            .await
            .map_err(|e| e.to_string())
    }
}
