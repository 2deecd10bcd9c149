//! # MailOtp API
//!
//! HTTP boundary for the MailOtp backend. Exposes the OTP issuance and
//! verification endpoints, maps domain errors to status codes and
//! user-facing messages, and wires the infrastructure implementations into
//! the OTP service.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
