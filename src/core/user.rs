//! User and game identification.
//!
//! ## UserId
//!
//! Opaque identifier issued by the host's identity service. Players and
//! observers share the same ID space, so a single ID can never be both.
//!
//! ## User
//!
//! An ID plus the display name shown to other participants. The engine never
//! interprets the name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rng::GameRng;

/// Identifier for a participant (player or observer).
///
/// Ordered so that sets of users iterate deterministically; every list the
/// engine exposes (winners, event subjects) is sorted by this ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Build an ID from a raw 128-bit value.
    ///
    /// Handy in tests where readable, ordered IDs matter.
    ///
    /// ```
    /// use apple_orange::core::UserId;
    ///
    /// let a = UserId::from_u128(1);
    /// let b = UserId::from_u128(2);
    /// assert!(a < b);
    /// ```
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant as supplied by the identity collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    /// Create a user with the given ID and display name.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Identifier for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Draw a v4 UUID from the game RNG.
    ///
    /// Using the seeded RNG rather than the OS keeps game IDs reproducible
    /// in tests.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.gen_bytes()).into_uuid())
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_ordering() {
        let ids = [UserId::from_u128(3), UserId::from_u128(1), UserId::from_u128(2)];
        let mut sorted = ids;
        sorted.sort();

        assert_eq!(
            sorted,
            [UserId::from_u128(1), UserId::from_u128(2), UserId::from_u128(3)]
        );
    }

    #[test]
    fn test_user_id_wraps_issued_uuid() {
        let issued = Uuid::from_u128(0xfeed);
        let id = UserId::from(issued);
        assert_eq!(id, UserId::from_u128(0xfeed));
        assert_eq!(id.to_string(), issued.to_string());
    }

    #[test]
    fn test_user_new() {
        let user = User::new(UserId::from_u128(7), "Ada");
        assert_eq!(user.id, UserId::from_u128(7));
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_game_id_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(GameId::generate(&mut rng1), GameId::generate(&mut rng2));
        assert_ne!(GameId::generate(&mut rng1), GameId::generate(&mut GameRng::new(43)));
    }

    #[test]
    fn test_game_id_is_v4() {
        let id = GameId::generate(&mut GameRng::new(1));
        assert_eq!(id.0.get_version_num(), 4);
    }

    #[test]
    fn test_user_id_serializes_as_plain_uuid() {
        let id = UserId::from_u128(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
