//! Mail delivery module
//!
//! Implementations of the core `Mailer` trait for delivering verification
//! codes:
//!
//! - **Mock**: console output for development and testing
//! - **HTTP API**: production delivery through a Mailgun-style HTTP mail
//!   endpoint

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, warn};

use mo_core::services::otp::Mailer;
use mo_shared::config::{MailConfig, MailProvider};

pub mod http_api;
pub mod mock;

pub use http_api::{HttpApiMailer, HttpMailerConfig};
pub use mock::MockMailer;

/// Render the verification email body
///
/// The validity window is stated in whole minutes, rounded up so the
/// message never promises less time than the code actually has.
pub fn verification_message(code: &str, valid_for: Duration) -> String {
    let minutes = valid_for.as_secs().div_ceil(60).max(1);
    format!("Your OTP is {}. It is valid for {} minutes.", code, minutes)
}

/// A mailer selected from configuration
///
/// Static dispatch over the configured provider, so the OTP service stays
/// generic without boxing.
pub enum AnyMailer {
    /// Console mock
    Mock(MockMailer),
    /// HTTP mail API client
    Http(HttpApiMailer),
}

#[async_trait]
impl Mailer for AnyMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<String, String> {
        match self {
            Self::Mock(mailer) => mailer.send_code(email, code, valid_for).await,
            Self::Http(mailer) => mailer.send_code(email, code, valid_for).await,
        }
    }
}

/// Create a mailer based on configuration
///
/// Falls back to the mock mailer when the HTTP provider is selected but
/// cannot be initialised, mirroring how a misconfigured provider should not
/// keep the service from starting in development.
pub fn create_mailer(config: &MailConfig) -> AnyMailer {
    match config.provider {
        MailProvider::Mock => AnyMailer::Mock(MockMailer::new()),
        MailProvider::Http => match HttpMailerConfig::from_mail_config(config) {
            Ok(http_config) => match HttpApiMailer::new(http_config) {
                Ok(mailer) => AnyMailer::Http(mailer),
                Err(e) => {
                    error!("Failed to initialize HTTP mailer: {}", e);
                    warn!("Falling back to mock mailer");
                    AnyMailer::Mock(MockMailer::new())
                }
            },
            Err(e) => {
                error!("Invalid HTTP mailer configuration: {}", e);
                warn!("Falling back to mock mailer");
                AnyMailer::Mock(MockMailer::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_message() {
        assert_eq!(
            verification_message("482913", Duration::from_secs(300)),
            "Your OTP is 482913. It is valid for 5 minutes."
        );
    }

    #[test]
    fn test_verification_message_rounds_up() {
        assert_eq!(
            verification_message("482913", Duration::from_secs(90)),
            "Your OTP is 482913. It is valid for 2 minutes."
        );
        // Never promises zero minutes
        assert_eq!(
            verification_message("482913", Duration::from_secs(5)),
            "Your OTP is 482913. It is valid for 1 minutes."
        );
    }

    #[test]
    fn test_create_mailer_defaults_to_mock() {
        let mailer = create_mailer(&MailConfig::default());
        assert!(matches!(mailer, AnyMailer::Mock(_)));
    }

    #[test]
    fn test_create_mailer_falls_back_on_bad_http_config() {
        let config = MailConfig {
            provider: MailProvider::Http,
            ..MailConfig::default()
        };
        // No API URL or key configured
        let mailer = create_mailer(&config);
        assert!(matches!(mailer, AnyMailer::Mock(_)));
    }
}
