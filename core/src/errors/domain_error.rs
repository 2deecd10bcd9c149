//! Domain-specific error types for OTP issuance and verification
//!
//! The variants form the full failure taxonomy of the OTP lifecycle. The API
//! layer maps each variant to an HTTP status and user-facing message; nothing
//! is swallowed internally.

use thiserror::Error;

/// Errors produced by the OTP lifecycle service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A required field was missing or empty (caller error, not retried)
    #[error("{message}")]
    InvalidRequest { message: String },

    /// No active challenge exists for the identifier, either because none
    /// was issued or because it expired. The caller must re-issue.
    #[error("No active challenge for this email")]
    ChallengeNotFound,

    /// The attempt budget for the challenge is used up (terminal); the
    /// caller must request a new code.
    #[error("Maximum verification attempts exceeded")]
    AttemptsExhausted,

    /// The submitted code did not match; the caller may retry while
    /// attempts remain.
    #[error("Invalid OTP ({attempts_left} attempts left)")]
    CodeMismatch { attempts_left: u32 },

    /// The external mail collaborator failed; transient, the caller may
    /// retry by re-issuing. No automatic retry happens internally.
    #[error("Failed to deliver verification code: {message}")]
    DeliveryFailed { message: String },

    /// The underlying store or another internal collaborator failed;
    /// surfaced distinctly from the domain outcomes above.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OtpError {
    /// Convenience constructor for invalid-request failures
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Convenience constructor for internal failures
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the same verify call may be retried without re-issuing
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CodeMismatch { .. } | Self::DeliveryFailed { .. })
    }

    /// Whether the failure terminated the challenge (re-issue required)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ChallengeNotFound | Self::AttemptsExhausted)
    }
}

/// Result type alias for OTP domain operations
pub type OtpResult<T> = Result<T, OtpError>;
