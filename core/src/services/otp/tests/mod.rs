//! Tests for the OTP lifecycle service

mod mocks;
mod service_tests;
