//! Challenge store repository interface and test double

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockChallengeStore;
pub use r#trait::ChallengeStore;
