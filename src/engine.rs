//! Registry of running games addressed by `GameId`.
//!
//! `Engine` owns the shared RNG and clock and routes each operation to the
//! right `Game`. Games do not share state, so a host that needs parallelism
//! can run one engine per shard, or lift single games out with
//! [`Engine::remove_game`] and drive them directly.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{Clock, EngineConfig, GameId, GameRng, SystemClock, User, UserId, WordPair};
use crate::game::{Game, GameError, GameResult};

/// Game registry.
///
/// ## Example
///
/// ```
/// use apple_orange::core::{EngineConfig, ManualClock, User, UserId, WordPair};
/// use apple_orange::engine::Engine;
///
/// let mut engine = Engine::with_clock(EngineConfig::default().with_seed(1), ManualClock::default())?;
/// let players = (1..=4).map(|n| User::new(UserId::from_u128(n), format!("p{n}"))).collect();
/// let id = engine.create_game(WordPair::new("apple", "orange"), players, vec![])?;
///
/// engine.submit_clue(id, UserId::from_u128(1), "crunchy")?;
/// assert_eq!(engine.game(id).unwrap().log().len(), 1);
/// # Ok::<(), apple_orange::game::GameError>(())
/// ```
#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    rng: GameRng,
    clock: C,
    games: FxHashMap<GameId, Game>,
}

impl Engine<SystemClock> {
    /// Create an engine on wall-clock time.
    pub fn new(config: EngineConfig) -> GameResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Engine<C> {
    /// Create an engine with a custom clock.
    pub fn with_clock(config: EngineConfig, clock: C) -> GameResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            clock,
            games: FxHashMap::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a new game and return its ID.
    pub fn create_game(
        &mut self,
        words: WordPair,
        players: Vec<User>,
        observers: Vec<User>,
    ) -> GameResult<GameId> {
        let game = Game::with_config(words, players, observers, &self.config, &mut self.rng, &self.clock)?;
        let id = game.id();
        self.games.insert(id, game);
        debug!(game = %id, running = self.games.len(), "game registered");
        Ok(id)
    }

    pub fn submit_clue(&mut self, game: GameId, player: UserId, clue: &str) -> GameResult<()> {
        let clock = &self.clock;
        Self::lookup(&mut self.games, game)?.submit_clue(player, clue, clock)
    }

    pub fn cast_vote(&mut self, game: GameId, voter: UserId, target: UserId) -> GameResult<()> {
        let clock = &self.clock;
        Self::lookup(&mut self.games, game)?.cast_vote(voter, target, clock)
    }

    pub fn declare_impostor(&mut self, game: GameId, player: UserId, guess: &str) -> GameResult<()> {
        let clock = &self.clock;
        Self::lookup(&mut self.games, game)?.declare_impostor(player, guess, clock)
    }

    /// Read-only view of a game.
    #[must_use]
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.get(&id)
    }

    /// All registered games, in no particular order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Drop a game from the registry, handing it back to the caller.
    pub fn remove_game(&mut self, id: GameId) -> Option<Game> {
        self.games.remove(&id)
    }

    /// Drop every finished game, returning how many were removed.
    pub fn prune_finished(&mut self) -> usize {
        let before = self.games.len();
        self.games.retain(|_, game| !game.is_over());
        before - self.games.len()
    }

    fn lookup(games: &mut FxHashMap<GameId, Game>, id: GameId) -> GameResult<&mut Game> {
        games.get_mut(&id).ok_or(GameError::UnknownGame(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    fn players(n: u128) -> Vec<User> {
        (1..=n).map(|i| User::new(UserId::from_u128(i), format!("p{i}"))).collect()
    }

    fn engine() -> Engine<ManualClock> {
        Engine::with_clock(EngineConfig::default().with_seed(11), ManualClock::at_millis(0)).unwrap()
    }

    #[test]
    fn test_create_and_lookup() {
        let mut engine = engine();
        let id = engine.create_game(WordPair::new("a", "b"), players(4), vec![]).unwrap();

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.game(id).unwrap().id(), id);
    }

    #[test]
    fn test_unknown_game() {
        let mut engine = engine();
        let missing = GameId::generate(&mut GameRng::new(999));

        assert_eq!(
            engine.submit_clue(missing, UserId::from_u128(1), "x"),
            Err(GameError::UnknownGame(missing))
        );
        assert_eq!(
            engine.cast_vote(missing, UserId::from_u128(1), UserId::from_u128(2)),
            Err(GameError::UnknownGame(missing))
        );
        assert_eq!(
            engine.declare_impostor(missing, UserId::from_u128(1), "x"),
            Err(GameError::UnknownGame(missing))
        );
    }

    #[test]
    fn test_games_are_independent() {
        let mut engine = engine();
        let first = engine.create_game(WordPair::new("a", "b"), players(4), vec![]).unwrap();
        let second = engine.create_game(WordPair::new("c", "d"), players(4), vec![]).unwrap();
        assert_ne!(first, second);

        engine.submit_clue(first, UserId::from_u128(1), "x").unwrap();

        assert_eq!(engine.game(first).unwrap().log().len(), 1);
        assert!(engine.game(second).unwrap().log().is_empty());
    }

    #[test]
    fn test_same_seed_same_games() {
        let mut a = engine();
        let mut b = engine();

        let id_a = a.create_game(WordPair::new("a", "b"), players(6), vec![]).unwrap();
        let id_b = b.create_game(WordPair::new("a", "b"), players(6), vec![]).unwrap();

        assert_eq!(id_a, id_b);
        assert_eq!(a.game(id_a).unwrap().alt_player(), b.game(id_b).unwrap().alt_player());
    }

    #[test]
    fn test_prune_finished() {
        let mut engine = engine();
        let done = engine.create_game(WordPair::new("a", "b"), players(4), vec![]).unwrap();
        let running = engine.create_game(WordPair::new("a", "b"), players(4), vec![]).unwrap();

        let orange = engine.game(done).unwrap().alt_player();
        engine.declare_impostor(done, orange, "a").unwrap();

        assert_eq!(engine.prune_finished(), 1);
        assert!(engine.game(done).is_none());
        assert!(engine.game(running).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Engine::with_clock(
            EngineConfig::default().with_final_survivors(1),
            ManualClock::default(),
        );
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }
}
