//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

/// Mail delivery provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Console-logging mock for development and testing (default)
    #[default]
    Mock,
    /// HTTP mail API provider (Mailgun-style messages endpoint)
    Http,
}

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Which provider implementation to use
    pub provider: MailProvider,

    /// Base URL of the HTTP mail API (e.g. the provider's messages endpoint)
    pub api_url: String,

    /// API key for the HTTP mail provider
    pub api_key: String,

    /// Sender address placed in the `From` header
    pub from_address: String,

    /// Subject line for verification emails
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            api_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@mailotp.local".to_string(),
            subject: "Your Email Verification Code".to_string(),
        }
    }
}

impl MailConfig {
    /// Load the mail configuration from environment variables
    ///
    /// Reads `MAIL_PROVIDER` (`mock` | `http`), `MAIL_API_URL`,
    /// `MAIL_API_KEY`, `MAIL_FROM`, and `MAIL_SUBJECT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = match std::env::var("MAIL_PROVIDER").as_deref() {
            Ok("http") => MailProvider::Http,
            _ => MailProvider::Mock,
        };
        Self {
            provider,
            api_url: std::env::var("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            subject: std::env::var("MAIL_SUBJECT").unwrap_or(defaults.subject),
        }
    }
}
