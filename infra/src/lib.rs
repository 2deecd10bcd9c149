//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailOtp backend,
//! providing concrete implementations of the domain's store and mailer
//! interfaces.
//!
//! ## Architecture
//!
//! - **Store**: challenge store implementations - an authoritative in-memory
//!   map and an optional Redis-backed variant for multi-instance deployments
//! - **Mail**: mail delivery implementations - a console mock for
//!   development and an HTTP mail API client for production
//!
//! ## Features
//!
//! - `redis-store`: Enable the Redis-backed challenge store

use thiserror::Error;

/// Mail delivery module - mock and HTTP API mailers
pub mod mail;

/// Store module - challenge store implementations
pub mod store;

/// Errors raised by infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Configuration was missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mail provider call failed
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// A store operation failed
    #[error("Store error: {0}")]
    Store(String),
}
