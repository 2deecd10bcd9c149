//! Challenge store implementations
//!
//! The in-memory store is the authoritative default, constructed at service
//! start and injected into the OTP service. The Redis-backed store
//! implements the same trait for deployments that need challenges to
//! survive restarts or be shared between instances.

pub mod memory;

#[cfg(feature = "redis-store")]
pub mod redis;

pub use memory::MemoryChallengeStore;

#[cfg(feature = "redis-store")]
pub use redis::RedisChallengeStore;
