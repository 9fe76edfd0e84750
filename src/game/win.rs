//! Terminal game outcome.

use serde::{Deserialize, Serialize};

use crate::core::UserId;

/// Why the game ended. Serialized names are stable wire codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// The impostor named the primary word.
    #[serde(rename = "orange_guessed_apple")]
    OrangeGuessedApple,
    /// The impostor guessed and missed.
    #[serde(rename = "orange_guessed_wrong")]
    OrangeGuessedWrong,
    /// The impostor was voted out.
    #[serde(rename = "orange_voted_out")]
    OrangeVotedOut,
    /// The impostor outlasted enough apples to win.
    #[serde(rename = "orange_surived")]
    OrangeSurvived,
}

impl WinReason {
    /// The stable wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WinReason::OrangeGuessedApple => "orange_guessed_apple",
            WinReason::OrangeGuessedWrong => "orange_guessed_wrong",
            WinReason::OrangeVotedOut => "orange_voted_out",
            WinReason::OrangeSurvived => "orange_surived",
        }
    }

    /// Whether the impostor is the winner.
    #[must_use]
    pub const fn impostor_won(self) -> bool {
        matches!(self, WinReason::OrangeGuessedApple | WinReason::OrangeSurvived)
    }
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Winning players, ascending by ID.
    pub winners: Vec<UserId>,
    #[serde(rename = "why")]
    pub reason: WinReason,
}

impl Win {
    /// Build a win; `winners` is sorted.
    pub fn new(winners: impl IntoIterator<Item = UserId>, reason: WinReason) -> Self {
        let mut winners: Vec<_> = winners.into_iter().collect();
        winners.sort();
        Self { winners, reason }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: UserId) -> bool {
        self.winners.binary_search(&player).is_ok()
    }
}
