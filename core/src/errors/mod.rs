//! Error types for the OTP domain

pub mod domain_error;

pub use domain_error::{OtpError, OtpResult};
