//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a challenge
#[derive(Debug, Clone)]
pub struct IssueResult {
    /// The mail provider's message id for the delivery
    pub message_id: String,

    /// When the issued challenge expires
    pub expires_at: DateTime<Utc>,
}
