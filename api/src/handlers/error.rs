//! Domain error to HTTP response mapping
//!
//! Every domain outcome maps to one fixed status code and message, the
//! complete error surface of the OTP endpoints:
//!
//! | Error               | Status | Message                                 |
//! |---------------------|--------|-----------------------------------------|
//! | `InvalidRequest`    | 400    | the error's own message                 |
//! | `ChallengeNotFound` | 400    | "Invalid or expired OTP"                |
//! | `CodeMismatch`      | 400    | "Invalid OTP (N attempts left)"         |
//! | `AttemptsExhausted` | 429    | "Too many attempts. Request a new OTP." |
//! | `DeliveryFailed`    | 500    | "Failed to send OTP"                    |
//! | `Internal`          | 500    | "Internal server error"                 |

use actix_web::HttpResponse;

use mo_core::errors::OtpError;
use mo_shared::types::StatusResponse;

/// Convert a domain error into its HTTP response
pub fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::InvalidRequest { message } => {
            HttpResponse::BadRequest().json(StatusResponse::err(message.clone()))
        }
        OtpError::ChallengeNotFound => {
            HttpResponse::BadRequest().json(StatusResponse::err("Invalid or expired OTP"))
        }
        OtpError::CodeMismatch { attempts_left } => HttpResponse::BadRequest().json(
            StatusResponse::err(format!("Invalid OTP ({} attempts left)", attempts_left)),
        ),
        OtpError::AttemptsExhausted => HttpResponse::TooManyRequests()
            .json(StatusResponse::err("Too many attempts. Request a new OTP.")),
        OtpError::DeliveryFailed { .. } => {
            HttpResponse::InternalServerError().json(StatusResponse::err("Failed to send OTP"))
        }
        OtpError::Internal { .. } => {
            HttpResponse::InternalServerError().json(StatusResponse::err("Internal server error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                OtpError::invalid_request("Email is required"),
                StatusCode::BAD_REQUEST,
            ),
            (OtpError::ChallengeNotFound, StatusCode::BAD_REQUEST),
            (
                OtpError::CodeMismatch { attempts_left: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (OtpError::AttemptsExhausted, StatusCode::TOO_MANY_REQUESTS),
            (
                OtpError::DeliveryFailed {
                    message: "timeout".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                OtpError::internal("store down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(otp_error_response(&error).status(), expected, "{:?}", error);
        }
    }
}
