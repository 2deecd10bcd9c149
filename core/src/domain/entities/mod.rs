//! Domain entities

pub mod challenge;

pub use challenge::OtpChallenge;
