//! Core types: user and game identifiers, words, RNG, clock, configuration.
//!
//! Everything here is independent of the round/vote rules; the other modules
//! build on these.

pub mod user;
pub mod words;
pub mod rng;
pub mod clock;
pub mod config;

pub use user::{GameId, User, UserId};
pub use words::WordPair;
pub use rng::GameRng;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, DEFAULT_FINAL_SURVIVORS};
