//! OTP route handlers
//!
//! This module contains the OTP lifecycle endpoints:
//! - Issuing a verification code to an email address
//! - Verifying a submitted code

use std::sync::Arc;

use actix_web::{web, Scope};

use mo_core::repositories::ChallengeStore;
use mo_core::services::otp::{Mailer, OtpService};

pub mod send;
pub mod verify;

pub use send::send_otp;
pub use verify::verify_otp;

/// Application state that holds the shared OTP service
pub struct AppState<S, M>
where
    S: ChallengeStore + 'static,
    M: Mailer + 'static,
{
    pub otp_service: Arc<OtpService<S, M>>,
}

/// Build the `/otp` scope with both lifecycle endpoints
pub fn otp_scope<S, M>() -> Scope
where
    S: ChallengeStore + 'static,
    M: Mailer + 'static,
{
    web::scope("/otp")
        .route("/send", web::post().to(send_otp::<S, M>))
        .route("/verify", web::post().to(verify_otp::<S, M>))
}
