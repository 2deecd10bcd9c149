//! DTOs for the OTP endpoints

use serde::{Deserialize, Serialize};

/// Request body for POST /api/v1/otp/send
///
/// `email` defaults to empty when absent so a missing field reaches the
/// service's own presence check and produces the contract's exact message
/// instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    /// Email address to deliver the verification code to
    #[serde(default)]
    pub email: String,
}

/// Request body for POST /api/v1/otp/verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// Email address the challenge was issued for
    #[serde(default)]
    pub email: String,

    /// The submitted verification code
    #[serde(default)]
    pub otp: String,
}
