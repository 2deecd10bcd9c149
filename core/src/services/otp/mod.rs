//! OTP lifecycle service for email-based verification
//!
//! This module provides the complete OTP workflow:
//! - Code generation and delivery via a pluggable mailer
//! - Time-bounded storage with cancellable expiry sweeps
//! - Attempt-limited verification with exact outcome reporting
//! - Per-identifier serialization of read-modify-write sequences

mod config;
mod expiry;
mod locks;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use expiry::ExpirySchedule;
pub use locks::{IdentifierGuard, IdentifierLocks};
pub use service::OtpService;
pub use traits::Mailer;
pub use types::IssueResult;
