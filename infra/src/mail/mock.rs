//! Mock Mailer Implementation
//!
//! A mock implementation of the mailer for development and testing. This
//! implementation logs verification emails to the console instead of
//! sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use mo_core::services::otp::Mailer;
use mo_shared::utils::{is_valid_email, mask_email};

use super::verification_message;

/// Mock mailer for development and testing
///
/// This implementation:
/// - Logs verification emails to console
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<String, String> {
        if !is_valid_email(email) {
            return Err(format!("Invalid email address: {}", mask_email(email)));
        }

        if self.simulate_failure {
            warn!(
                "Mock mailer simulating failure for email: {}",
                mask_email(email)
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let body = verification_message(code, valid_for);

        if self.console_output {
            // Console output for development - shows the full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", email);
            println!("Message ID: {}", message_id);
            println!("Subject: Your Email Verification Code");
            println!("Body: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "mock",
            email = %mask_email(email),
            message_id = %message_id,
            "Verification email delivered (mock)"
        );

        Ok(message_id)
    }
}
