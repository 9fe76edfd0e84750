//! Log event types.
//!
//! Every state transition a game goes through is recorded as a `LogEvent`.
//! Event type names are stable wire identifiers: external consumers replay
//! and audit games by them, so they never change even where the spelling is
//! odd.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::UserId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A player submitted a clue. `user_id` + `clue`.
    #[serde(rename = "clue")]
    Clue,
    /// An ordinary round started. `user_ids` = players still in.
    #[serde(rename = "next_round")]
    NextRound,
    /// A tie-break round started. `user_ids` = candidates.
    #[serde(rename = "sudden_death_round")]
    SuddenDeathRound,
    /// A non-impostor was voted out. `user_id`.
    #[serde(rename = "event_apple_voted_out")]
    AppleVotedOut,
    /// The impostor was voted out. `user_id`.
    #[serde(rename = "event_orange_voted_out")]
    OrangeVotedOut,
    /// The impostor reached the final survivors. `user_id`.
    #[serde(rename = "orange_survived")]
    OrangeSurvived,
    /// A non-impostor declared themselves the impostor. `user_id` + `guess`.
    #[serde(rename = "apple_thought_it_was_the_orange")]
    AppleThoughtItWasTheOrange,
    /// The impostor named the primary word. `user_id` + `guess`.
    #[serde(rename = "orange_guessed_right")]
    OrangeGuessedRight,
    /// The impostor guessed and missed. `user_id` + `guess`.
    #[serde(rename = "orange_guessed_wrong")]
    OrangeGuessedWrong,
}

impl EventType {
    /// The stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Clue => "clue",
            EventType::NextRound => "next_round",
            EventType::SuddenDeathRound => "sudden_death_round",
            EventType::AppleVotedOut => "event_apple_voted_out",
            EventType::OrangeVotedOut => "event_orange_voted_out",
            EventType::OrangeSurvived => "orange_survived",
            EventType::AppleThoughtItWasTheOrange => "apple_thought_it_was_the_orange",
            EventType::OrangeGuessedRight => "orange_guessed_right",
            EventType::OrangeGuessedWrong => "orange_guessed_wrong",
        }
    }

    /// Whether the event ends the game.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            EventType::OrangeVotedOut
                | EventType::OrangeSurvived
                | EventType::OrangeGuessedRight
                | EventType::OrangeGuessedWrong
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit record.
///
/// Single-subject events set `user_id`; multi-subject events (round starts)
/// set `user_ids`, sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Most multi-subject events name a handful of players.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub user_ids: SmallVec<[UserId; 8]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
}

impl LogEvent {
    /// Create an event with just a type.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            user_id: None,
            user_ids: SmallVec::new(),
            guess: None,
            clue: None,
        }
    }

    /// Set the acting user (builder pattern).
    #[must_use]
    pub fn with_user(mut self, user: UserId) -> Self {
        self.user_id = Some(user);
        self
    }

    /// Set the subject users (builder pattern). Sorted on the way in.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.user_ids = users.into_iter().collect();
        self.user_ids.sort();
        self
    }

    /// Attach clue text (builder pattern).
    #[must_use]
    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }

    /// Attach guess text (builder pattern).
    #[must_use]
    pub fn with_guess(mut self, guess: impl Into<String>) -> Self {
        self.guess = Some(guess.into());
        self
    }
}

/// Builders for the event shapes the game emits.
impl LogEvent {
    pub fn clue(user: UserId, clue: impl Into<String>) -> Self {
        Self::new(EventType::Clue).with_user(user).with_clue(clue)
    }

    pub fn next_round(still_in: impl IntoIterator<Item = UserId>) -> Self {
        Self::new(EventType::NextRound).with_users(still_in)
    }

    pub fn sudden_death_round(candidates: impl IntoIterator<Item = UserId>) -> Self {
        Self::new(EventType::SuddenDeathRound).with_users(candidates)
    }

    pub fn voted_out(user: UserId, was_impostor: bool) -> Self {
        let event_type = if was_impostor {
            EventType::OrangeVotedOut
        } else {
            EventType::AppleVotedOut
        };
        Self::new(event_type).with_user(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> UserId {
        UserId::from_u128(n)
    }

    #[test]
    fn test_builder() {
        let event = LogEvent::new(EventType::AppleThoughtItWasTheOrange)
            .with_user(uid(1))
            .with_guess("pear");

        assert_eq!(event.event_type, EventType::AppleThoughtItWasTheOrange);
        assert_eq!(event.user_id, Some(uid(1)));
        assert_eq!(event.guess.as_deref(), Some("pear"));
        assert!(event.clue.is_none());
        assert!(event.user_ids.is_empty());
    }

    #[test]
    fn test_with_users_sorts() {
        let event = LogEvent::next_round([uid(3), uid(1), uid(2)]);
        assert_eq!(event.user_ids.as_slice(), &[uid(1), uid(2), uid(3)]);
    }

    #[test]
    fn test_voted_out_picks_type() {
        assert_eq!(LogEvent::voted_out(uid(1), false).event_type, EventType::AppleVotedOut);
        assert_eq!(LogEvent::voted_out(uid(1), true).event_type, EventType::OrangeVotedOut);
    }

    #[test]
    fn test_terminal_types() {
        assert!(EventType::OrangeVotedOut.is_terminal());
        assert!(EventType::OrangeGuessedWrong.is_terminal());
        assert!(!EventType::AppleVotedOut.is_terminal());
        assert!(!EventType::AppleThoughtItWasTheOrange.is_terminal());
    }

    #[test]
    fn test_wire_names_match_display() {
        for event_type in [
            EventType::Clue,
            EventType::NextRound,
            EventType::SuddenDeathRound,
            EventType::AppleVotedOut,
            EventType::OrangeVotedOut,
            EventType::OrangeSurvived,
            EventType::AppleThoughtItWasTheOrange,
            EventType::OrangeGuessedRight,
            EventType::OrangeGuessedWrong,
        ] {
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json, format!("\"{}\"", event_type));
        }
    }

    #[test]
    fn test_json_shape_omits_empty_fields() {
        let event = LogEvent::clue(uid(1), "red");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "clue");
        assert_eq!(value["clue"], "red");
        assert!(value.get("guess").is_none());
        assert!(value.get("user_ids").is_none());

        let back: LogEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }
}
