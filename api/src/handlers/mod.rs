//! Response construction helpers

pub mod error;

pub use error::otp_error_response;
