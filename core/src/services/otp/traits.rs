//! Trait for mail delivery integration

use async_trait::async_trait;
use std::time::Duration;

/// Trait for the external mail delivery collaborator
///
/// Implementations live in the infrastructure layer. Errors are plain
/// strings at this seam; the service wraps them into the domain taxonomy.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a verification code to an email address
    ///
    /// `valid_for` is how long the code stays usable, so the message body
    /// can state it. Returns a provider message id on success.
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<String, String>;
}
