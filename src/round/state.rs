//! A single clue → vote cycle.

use chrono::{DateTime, Utc};
use im::OrdSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::UserId;

/// Membership set used for the per-round participant lists.
///
/// `im::OrdSet` iterates in ascending ID order and clones in O(1), which is
/// what carrying the sets from one round to the next needs.
pub type UserSet = OrdSet<UserId>;

/// Where a round is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Waiting for clues from `players_giving_clues`.
    CluePhase,
    /// All clues in; waiting for votes from `users_voting`.
    VotingPhase,
    /// Every voter has voted and the ballots were tallied.
    Resolved,
}

/// What an accepted mutation moved the round to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseChange {
    /// Still in the same phase.
    Unchanged,
    /// The last required clue arrived; voting is now open.
    VotingOpened,
    /// The last vote arrived; the round must be tallied.
    VotingComplete,
}

/// One voting cycle.
///
/// Rounds are created and mutated only by the owning `Game`; callers get
/// shared references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    is_sudden_death: bool,
    clues: FxHashMap<UserId, String>,
    votes: FxHashMap<UserId, UserId>,
    players_still_in: UserSet,
    players_giving_clues: UserSet,
    users_voting: UserSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    player_eliminated: Option<UserId>,
    round_started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voting_started_at: Option<DateTime<Utc>>,
}

impl Round {
    /// An ordinary round: every active player gives a clue and can be voted
    /// out.
    pub(crate) fn ordinary(players_still_in: UserSet, users_voting: UserSet, now: DateTime<Utc>) -> Self {
        Self {
            is_sudden_death: false,
            clues: FxHashMap::default(),
            votes: FxHashMap::default(),
            players_giving_clues: players_still_in.clone(),
            players_still_in,
            users_voting,
            player_eliminated: None,
            round_started_at: now,
            voting_started_at: None,
        }
    }

    /// A tie-break round following `previous`.
    ///
    /// Only `candidates` give clues and can be voted on. Nobody leaves the
    /// active or voting sets, so candidates still vote too: otherwise a round
    /// where everyone tied would have no voters at all.
    pub(crate) fn sudden_death(previous: &Round, candidates: UserSet, now: DateTime<Utc>) -> Self {
        assert!(
            candidates.len() >= 2,
            "Sudden death needs at least two candidates, got {}",
            candidates.len()
        );
        Self {
            is_sudden_death: true,
            clues: FxHashMap::default(),
            votes: FxHashMap::default(),
            players_still_in: previous.players_still_in.clone(),
            players_giving_clues: candidates,
            users_voting: previous.users_voting.clone(),
            player_eliminated: None,
            round_started_at: now,
            voting_started_at: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn is_sudden_death(&self) -> bool {
        self.is_sudden_death
    }

    /// Submitted clues keyed by player.
    #[must_use]
    pub fn clues(&self) -> &FxHashMap<UserId, String> {
        &self.clues
    }

    /// A player's clue this round, if given.
    #[must_use]
    pub fn clue(&self, player: UserId) -> Option<&str> {
        self.clues.get(&player).map(String::as_str)
    }

    /// Current ballots keyed by voter.
    #[must_use]
    pub fn votes(&self) -> &FxHashMap<UserId, UserId> {
        &self.votes
    }

    /// Who `voter` currently votes for.
    #[must_use]
    pub fn vote_of(&self, voter: UserId) -> Option<UserId> {
        self.votes.get(&voter).copied()
    }

    #[must_use]
    pub fn players_still_in(&self) -> &UserSet {
        &self.players_still_in
    }

    #[must_use]
    pub fn players_giving_clues(&self) -> &UserSet {
        &self.players_giving_clues
    }

    #[must_use]
    pub fn users_voting(&self) -> &UserSet {
        &self.users_voting
    }

    #[must_use]
    pub fn player_eliminated(&self) -> Option<UserId> {
        self.player_eliminated
    }

    #[must_use]
    pub fn round_started_at(&self) -> DateTime<Utc> {
        self.round_started_at
    }

    #[must_use]
    pub fn voting_started_at(&self) -> Option<DateTime<Utc>> {
        self.voting_started_at
    }

    // === Queries ===

    #[must_use]
    pub fn is_still_in(&self, user: UserId) -> bool {
        self.players_still_in.contains(&user)
    }

    #[must_use]
    pub fn is_clue_giver(&self, user: UserId) -> bool {
        self.players_giving_clues.contains(&user)
    }

    #[must_use]
    pub fn can_vote(&self, user: UserId) -> bool {
        self.users_voting.contains(&user)
    }

    /// Whether `user` already gave a non-empty clue.
    #[must_use]
    pub fn has_given_clue(&self, user: UserId) -> bool {
        self.clues.get(&user).is_some_and(|c| !c.is_empty())
    }

    /// Clue-givers who still owe a clue, ascending.
    pub fn pending_clue_givers(&self) -> impl Iterator<Item = UserId> + '_ {
        self.players_giving_clues
            .iter()
            .copied()
            .filter(move |p| !self.clues.contains_key(p))
    }

    /// Voters who have not voted yet, ascending.
    pub fn pending_voters(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users_voting
            .iter()
            .copied()
            .filter(move |v| !self.votes.contains_key(v))
    }

    /// Every required clue has been submitted.
    #[must_use]
    pub fn clues_complete(&self) -> bool {
        self.clues.len() == self.players_giving_clues.len()
    }

    /// Every eligible voter has voted.
    #[must_use]
    pub fn votes_complete(&self) -> bool {
        !self.users_voting.is_empty() && self.votes.len() == self.users_voting.len()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        if self.voting_started_at.is_none() {
            RoundPhase::CluePhase
        } else if self.votes_complete() {
            RoundPhase::Resolved
        } else {
            RoundPhase::VotingPhase
        }
    }

    // === Mutation (game-internal) ===

    pub(crate) fn record_clue(&mut self, player: UserId, clue: String) {
        debug_assert!(self.is_clue_giver(player));
        self.clues.insert(player, clue);
    }

    pub(crate) fn record_vote(&mut self, voter: UserId, target: UserId) {
        debug_assert!(self.can_vote(voter) && self.is_clue_giver(target));
        self.votes.insert(voter, target);
    }

    pub(crate) fn set_eliminated(&mut self, player: UserId) {
        self.player_eliminated = Some(player);
        self.players_still_in.remove(&player);
    }

    /// Take a player out of every set in this round.
    ///
    /// Their own clue and ballot go, and so do ballots cast for them; those
    /// voters have to vote again.
    pub(crate) fn withdraw(&mut self, player: UserId) {
        self.players_still_in.remove(&player);
        self.players_giving_clues.remove(&player);
        self.users_voting.remove(&player);
        self.clues.remove(&player);
        self.votes.remove(&player);
        self.votes.retain(|_, target| *target != player);
    }

    /// Move the round forward if the last mutation completed a phase.
    ///
    /// Voting opens at most once; `VotingComplete` is reported every time it
    /// is called on a fully voted round, and the caller resolves it.
    pub(crate) fn advance(&mut self, now: DateTime<Utc>) -> PhaseChange {
        if self.voting_started_at.is_none() {
            if self.clues_complete() && !self.players_giving_clues.is_empty() {
                self.voting_started_at = Some(now);
                return PhaseChange::VotingOpened;
            }
            return PhaseChange::Unchanged;
        }
        if self.votes_complete() {
            return PhaseChange::VotingComplete;
        }
        PhaseChange::Unchanged
    }
}
