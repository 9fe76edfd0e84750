//! # apple-orange
//!
//! Rules engine for "apple, apple, orange", a social deduction word game.
//!
//! Every player but one (the *apples*) gets the same secret word; the
//! *orange* gets a decoy. Players give one-word clues, then everyone votes
//! to eliminate a suspect. The orange wins by surviving to the final three
//! or by naming the apples' word; the apples win by voting the orange out
//! or when the orange guesses wrong.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: a [`Game`] is mutated only through its three
//!    operations and only through `&mut self`. Callers get shared views.
//!
//! 2. **Deterministic**: randomness and time are injected ([`GameRng`],
//!    [`Clock`]), and every list derived from a set is sorted by user ID.
//!
//! 3. **Append-only history**: rounds and the event log only grow.
//!
//! ## Modules
//!
//! - `core`: user and game IDs, word pair, RNG, clock, configuration
//! - `log`: audit events
//! - `round`: per-round participant sets and phase transitions
//! - `tally`: ballot counting and tie-breaks
//! - `game`: the game aggregate, win detection, guess handling
//! - `engine`: registry of games by ID

pub mod core;
pub mod log;
pub mod round;
pub mod tally;
pub mod game;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Clock, EngineConfig, GameId, GameRng, ManualClock, SystemClock, User, UserId, WordPair,
};

pub use crate::log::{EventLog, EventType, LogEvent};

pub use crate::round::{Round, RoundPhase, UserSet};

pub use crate::tally::{Tally, TallyOutcome};

pub use crate::game::{Game, GameError, GameResult, Win, WinReason};

pub use crate::engine::Engine;
