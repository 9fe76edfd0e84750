//! The game aggregate and its three operations.
//!
//! - [`Game::submit_clue`]: clue phase
//! - [`Game::cast_vote`]: voting phase; the last vote triggers the tally
//! - [`Game::declare_impostor`]: the guess handler, usable in any phase
//!
//! A game is in progress until [`Game::win`] is set; after that every
//! operation fails with [`GameError::GameOver`].

mod aggregate;
mod error;
mod guess;
mod win;

pub use aggregate::Game;
pub use error::{GameError, GameResult};
pub use win::{Win, WinReason};
