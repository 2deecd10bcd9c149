//! Repository interfaces owned by the domain layer

pub mod challenge;

pub use challenge::ChallengeStore;
