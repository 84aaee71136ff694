//! Services containing the token lifecycle logic.

pub mod token;

// Re-export commonly used types
pub use token::{
    RefreshPolicy, RevocationCache, RevocationSweeper, SweepResult, TokenCodec,
    TokenManager, TokenManagerConfig, TokenManagerHandle,
};
