//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Standard API response envelope
///
/// Every endpoint answers with this shape so clients can branch on `success`
/// and surface `msg` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome message
    pub msg: String,
}

impl StatusResponse {
    /// Create a successful response
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
        }
    }

    /// Create an error response
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let response = StatusResponse::ok("OTP sent successfully");
        assert!(response.is_success());
        assert_eq!(response.msg, "OTP sent successfully");
    }

    #[test]
    fn test_err_response() {
        let response = StatusResponse::err("Email is required");
        assert!(!response.is_success());
        assert_eq!(response.msg, "Email is required");
    }

    #[test]
    fn test_serialization_shape() {
        let response = StatusResponse::ok("OTP verified successfully");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "msg": "OTP verified successfully" })
        );
    }

    #[test]
    fn test_round_trip() {
        let json = r#"{"success":false,"msg":"Invalid or expired OTP"}"#;
        let response: StatusResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.msg, "Invalid or expired OTP");
    }
}
