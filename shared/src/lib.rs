//! # MailOtp Shared
//!
//! Cross-cutting types and configuration shared by the MailOtp backend crates.
//! This crate contains the API response envelope, environment-driven
//! configuration for the server, OTP policy, and mail delivery, plus email
//! address utilities used across layers.

pub mod config;
pub mod types;
pub mod utils;
