use actix_web::{web, HttpResponse};

use crate::dto::otp::SendOtpRequest;
use crate::handlers::error::otp_error_response;

use mo_core::repositories::ChallengeStore;
use mo_core::services::otp::Mailer;
use mo_shared::types::StatusResponse;
use mo_shared::utils::mask_email;

use super::AppState;

/// Handler for POST /api/v1/otp/send
///
/// Issues a verification code and delivers it to the given email address.
/// Re-issuing for the same address replaces any outstanding challenge.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com"
/// }
/// ```
///
/// # Responses
///
/// - 200 OK: `{ "success": true, "msg": "OTP sent successfully" }`
/// - 400 Bad Request: `{ "success": false, "msg": "Email is required" }`
/// - 500 Internal Server Error: `{ "success": false, "msg": "Failed to send OTP" }`
pub async fn send_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: ChallengeStore + 'static,
    M: Mailer + 'static,
{
    log::info!(
        "Processing send_otp request for email: {}",
        mask_email(&request.email)
    );

    match state.otp_service.issue_challenge(&request.email).await {
        Ok(result) => {
            log::info!(
                "Verification code sent to {}, message_id: {}, expires_at: {}",
                mask_email(&request.email),
                result.message_id,
                result.expires_at
            );
            HttpResponse::Ok().json(StatusResponse::ok("OTP sent successfully"))
        }
        Err(error) => {
            log::warn!(
                "Failed to issue challenge for {}: {}",
                mask_email(&request.email),
                error
            );
            otp_error_response(&error)
        }
    }
}
