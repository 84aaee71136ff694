//! # TokenGate Core
//!
//! Session-token lifecycle for the TokenGate backend: issuing signed bearer
//! tokens, validating them, refreshing them and revoking them on logout.
//! Revocations live in a concurrent in-memory cache that is reclaimed both
//! lazily on lookup and by a periodic sweeper.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use services::*;
