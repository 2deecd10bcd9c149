//! Request and response DTOs

pub mod otp;

pub use otp::{SendOtpRequest, VerifyOtpRequest};
