//! The `Game` aggregate: creation, clue and vote handling, resolution.
//!
//! ## Flow
//!
//! Each accepted mutation ends with `advance`, the single transition step:
//! the current round is asked whether the mutation completed a phase, and if
//! voting is complete the ballots are tallied and applied here. Tallying
//! either starts the next round or sets the terminal `Win`.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{GameError, GameResult};
use super::win::{Win, WinReason};
use crate::core::{Clock, EngineConfig, GameId, GameRng, User, UserId, WordPair};
use crate::log::{EventLog, EventType, LogEvent};
use crate::round::{PhaseChange, Round, UserSet};
use crate::tally::{Tally, TallyOutcome};

/// One play session.
///
/// `Game` is exclusively owned by its caller and mutated only through
/// [`submit_clue`](Game::submit_clue), [`cast_vote`](Game::cast_vote) and
/// [`declare_impostor`](Game::declare_impostor). Accessors hand out shared
/// references, so rounds and the log cannot be edited from outside.
///
/// ## Example
///
/// ```
/// use apple_orange::core::{GameRng, ManualClock, User, UserId, WordPair};
/// use apple_orange::game::Game;
///
/// let players: Vec<_> = (1..=4)
///     .map(|n| User::new(UserId::from_u128(n), format!("p{n}")))
///     .collect();
/// let clock = ManualClock::at_millis(0);
/// let mut rng = GameRng::new(42);
///
/// let mut game = Game::new(WordPair::new("apple", "orange"), players, vec![], &mut rng, &clock)?;
/// for n in 1..=4 {
///     game.submit_clue(UserId::from_u128(n), "fruit", &clock)?;
/// }
/// assert!(game.current_round().voting_started_at().is_some());
/// # Ok::<(), apple_orange::game::GameError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(rename = "word_pair")]
    words: WordPair,
    players: Vec<User>,
    observers: Vec<User>,
    alt_player: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    win: Option<Win>,
    /// Chronological; the last one is current.
    rounds: Vec<Round>,
    log: EventLog,
    final_survivors: usize,
}

impl Game {
    /// Create a game with default settings.
    pub fn new(
        words: WordPair,
        players: Vec<User>,
        observers: Vec<User>,
        rng: &mut GameRng,
        clock: &dyn Clock,
    ) -> GameResult<Self> {
        Self::with_config(words, players, observers, &EngineConfig::default(), rng, clock)
    }

    /// Create a game.
    ///
    /// The impostor is drawn uniformly from `players`. All players give clues
    /// in the first round; players and observers all vote.
    pub fn with_config(
        words: WordPair,
        players: Vec<User>,
        observers: Vec<User>,
        config: &EngineConfig,
        rng: &mut GameRng,
        clock: &dyn Clock,
    ) -> GameResult<Self> {
        config.validate()?;
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let mut seen = FxHashSet::default();
        for user in players.iter().chain(observers.iter()) {
            if !seen.insert(user.id) {
                return Err(GameError::DuplicateUser(user.id));
            }
        }

        let alt_player = players[rng.gen_index(players.len())].id;
        let id = GameId::generate(rng);
        let now = clock.now();

        let still_in: UserSet = players.iter().map(|p| p.id).collect();
        let voting: UserSet = players
            .iter()
            .chain(observers.iter())
            .map(|u| u.id)
            .collect();

        info!(
            game = %id,
            players = players.len(),
            observers = observers.len(),
            "game created"
        );

        Ok(Self {
            id,
            created_at: now,
            updated_at: now,
            words,
            players,
            observers,
            alt_player,
            win: None,
            rounds: vec![Round::ordinary(still_in, voting, now)],
            log: EventLog::new(),
            final_survivors: config.final_survivors,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last accepted mutation. Never moves backwards.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn words(&self) -> &WordPair {
        &self.words
    }

    /// Players in the order given at creation.
    #[must_use]
    pub fn players(&self) -> &[User] {
        &self.players
    }

    #[must_use]
    pub fn observers(&self) -> &[User] {
        &self.observers
    }

    /// Look up a player or observer.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.players
            .iter()
            .chain(self.observers.iter())
            .find(|u| u.id == id)
    }

    /// The impostor.
    #[must_use]
    pub fn alt_player(&self) -> UserId {
        self.alt_player
    }

    #[must_use]
    pub fn win(&self) -> Option<&Win> {
        self.win.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.win.is_some()
    }

    /// All rounds, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn current_round(&self) -> &Round {
        self.rounds.last().expect("game always has a current round")
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Players still in the game, ascending by ID.
    pub fn active_players(&self) -> impl Iterator<Item = UserId> + '_ {
        self.current_round().players_still_in().iter().copied()
    }

    #[must_use]
    pub fn final_survivors(&self) -> usize {
        self.final_survivors
    }

    // === Operations ===

    /// Record `player`'s clue for the current round.
    ///
    /// Once the last required clue is in, voting opens.
    pub fn submit_clue(&mut self, player: UserId, clue: &str, clock: &dyn Clock) -> GameResult<()> {
        self.ensure_in_progress()?;
        let round = self.current_round();
        if !round.is_clue_giver(player) {
            return Err(GameError::NotEligible(player));
        }
        if round.has_given_clue(player) {
            return Err(GameError::AlreadySubmitted(player));
        }
        if clue.trim().is_empty() {
            return Err(GameError::EmptyClue);
        }

        let now = clock.now();
        self.current_round_mut().record_clue(player, clue.to_owned());
        self.log.push(LogEvent::clue(player, clue));
        self.touch(now);
        debug!(game = %self.id, user = %player, "clue submitted");

        self.advance(now);
        Ok(())
    }

    /// Record `voter`'s ballot against `target`.
    ///
    /// A voter may change their vote until the last voter votes; at that
    /// point the round is tallied.
    pub fn cast_vote(&mut self, voter: UserId, target: UserId, clock: &dyn Clock) -> GameResult<()> {
        self.ensure_in_progress()?;
        let round = self.current_round();
        if !round.can_vote(voter) {
            return Err(GameError::NotAllowedToVote(voter));
        }
        if round.voting_started_at().is_none() {
            return Err(GameError::CluesIncomplete);
        }
        if !round.is_clue_giver(target) {
            return Err(GameError::InvalidTarget(target));
        }

        let now = clock.now();
        self.current_round_mut().record_vote(voter, target);
        self.touch(now);
        debug!(game = %self.id, voter = %voter, target = %target, "vote cast");

        self.advance(now);
        Ok(())
    }

    // === Internals ===

    pub(super) fn ensure_in_progress(&self) -> GameResult<()> {
        if self.win.is_some() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    pub(super) fn current_round_mut(&mut self) -> &mut Round {
        self.rounds.last_mut().expect("game always has a current round")
    }

    pub(super) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }

    pub(super) fn record(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    pub(super) fn finish(&mut self, win: Win) {
        info!(
            game = %self.id,
            reason = %win.reason,
            winners = ?win.winners,
            "game over"
        );
        self.win = Some(win);
    }

    /// Run the phase transition for the current round.
    pub(super) fn advance(&mut self, now: DateTime<Utc>) {
        loop {
            match self.current_round_mut().advance(now) {
                PhaseChange::Unchanged => return,
                PhaseChange::VotingOpened => {
                    debug!(game = %self.id, round = self.rounds.len(), "voting opened");
                }
                PhaseChange::VotingComplete => {
                    self.resolve(now);
                    return;
                }
            }
        }
    }

    fn resolve(&mut self, now: DateTime<Utc>) {
        let tally = Tally::count(self.current_round().votes().values().copied());
        debug!(
            game = %self.id,
            ballots = tally.ballots_cast(),
            "tallying round {}",
            self.rounds.len()
        );

        match tally.outcome() {
            TallyOutcome::Majority(player) => self.eliminate(player, now),
            TallyOutcome::SuddenDeath(candidates) => self.start_sudden_death(candidates, now),
        }
    }

    fn eliminate(&mut self, player: UserId, now: DateTime<Utc>) {
        let impostor = self.alt_player;
        let round = self.current_round_mut();
        round.set_eliminated(player);
        let still_in = round.players_still_in().clone();
        let mut voting = round.users_voting().clone();
        voting.remove(&player);

        self.record(LogEvent::voted_out(player, player == impostor));
        info!(game = %self.id, user = %player, impostor = player == impostor, "player voted out");

        if player == impostor {
            // Empty when every apple withdrew and the impostor voted alone.
            self.finish(Win::new(still_in, WinReason::OrangeVotedOut));
            return;
        }

        if still_in.len() <= self.final_survivors {
            self.record(LogEvent::new(EventType::OrangeSurvived).with_user(impostor));
            self.finish(Win::new([impostor], WinReason::OrangeSurvived));
            return;
        }

        self.start_round(still_in, voting, now);
    }

    pub(super) fn start_round(&mut self, still_in: UserSet, voting: UserSet, now: DateTime<Utc>) {
        self.record(LogEvent::next_round(still_in.iter().copied()));
        self.rounds.push(Round::ordinary(still_in, voting, now));
        info!(game = %self.id, round = self.rounds.len(), "next round");
    }

    fn start_sudden_death(&mut self, candidates: UserSet, now: DateTime<Utc>) {
        self.record(LogEvent::sudden_death_round(candidates.iter().copied()));
        let round = Round::sudden_death(self.current_round(), candidates, now);
        self.rounds.push(round);
        info!(game = %self.id, round = self.rounds.len(), "sudden death round");
    }
}
