//! Round management.
//!
//! A round collects one clue from each clue-giver, then one vote from each
//! voter. The owning game advances the round after every accepted mutation;
//! the returned [`PhaseChange`] tells it when to tally.

mod state;

pub use state::{PhaseChange, Round, RoundPhase, UserSet};
