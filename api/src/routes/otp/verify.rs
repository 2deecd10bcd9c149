use actix_web::{web, HttpResponse};

use crate::dto::otp::VerifyOtpRequest;
use crate::handlers::error::otp_error_response;

use mo_core::repositories::ChallengeStore;
use mo_core::services::otp::Mailer;
use mo_shared::types::StatusResponse;
use mo_shared::utils::mask_email;

use super::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// Verifies a submitted code against the active challenge for an email
/// address. Success consumes the challenge; so do expiry and attempt
/// exhaustion.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "otp": "123456"
/// }
/// ```
///
/// # Responses
///
/// - 200 OK: `{ "success": true, "msg": "OTP verified successfully" }`
/// - 400 Bad Request: missing fields, unknown/expired challenge, or mismatch
/// - 429 Too Many Requests: attempt budget exhausted
/// - 500 Internal Server Error: store failure
pub async fn verify_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: ChallengeStore + 'static,
    M: Mailer + 'static,
{
    log::info!(
        "Processing verify_otp request for email: {}",
        mask_email(&request.email)
    );

    match state
        .otp_service
        .verify_challenge(&request.email, &request.otp)
        .await
    {
        Ok(()) => {
            log::info!("Challenge verified for {}", mask_email(&request.email));
            HttpResponse::Ok().json(StatusResponse::ok("OTP verified successfully"))
        }
        Err(error) => {
            log::warn!(
                "Verification failed for {}: {}",
                mask_email(&request.email),
                error
            );
            otp_error_response(&error)
        }
    }
}
