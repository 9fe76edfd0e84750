//! Ballot counting.
//!
//! [`Tally`] ranks candidates by votes received and decides between a
//! majority elimination and a sudden-death round. It knows nothing about who
//! the impostor is; the game applies the outcome.
//!
//! ## Ranking
//!
//! Candidates are ordered by vote count, descending. Equal counts are ordered
//! by ascending `UserId` so the ranking is reproducible.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::UserId;
use crate::round::UserSet;

/// Votes received by one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing {
    pub candidate: UserId,
    pub votes: usize,
}

/// What the ballots decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TallyOutcome {
    /// One candidate got more than half the ballots.
    Majority(UserId),
    /// No majority: these candidates go to a tie-break round.
    SuddenDeath(UserSet),
}

/// Ranked ballot count for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    standings: SmallVec<[Standing; 8]>,
    ballots_cast: usize,
}

impl Tally {
    /// Count ballots, one per vote target.
    ///
    /// ```
    /// use apple_orange::core::UserId;
    /// use apple_orange::tally::{Tally, TallyOutcome};
    ///
    /// let (a, b) = (UserId::from_u128(1), UserId::from_u128(2));
    /// let tally = Tally::count([a, a, b]);
    /// assert_eq!(tally.outcome(), TallyOutcome::Majority(a));
    /// ```
    pub fn count(targets: impl IntoIterator<Item = UserId>) -> Self {
        let mut counts: FxHashMap<UserId, usize> = FxHashMap::default();
        let mut ballots_cast = 0;
        for target in targets {
            *counts.entry(target).or_insert(0) += 1;
            ballots_cast += 1;
        }

        let mut standings: SmallVec<[Standing; 8]> = counts
            .into_iter()
            .map(|(candidate, votes)| Standing { candidate, votes })
            .collect();
        standings.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.candidate.cmp(&b.candidate)));

        Self {
            standings,
            ballots_cast,
        }
    }

    /// Total ballots counted.
    #[must_use]
    pub fn ballots_cast(&self) -> usize {
        self.ballots_cast
    }

    /// Candidates ranked by votes, most first.
    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Votes received by `candidate` (zero if none).
    #[must_use]
    pub fn votes_for(&self, candidate: UserId) -> usize {
        self.standings
            .iter()
            .find(|s| s.candidate == candidate)
            .map_or(0, |s| s.votes)
    }

    /// Decide the round.
    ///
    /// Majority means `top * 2 > ballots_cast`. Otherwise every candidate tied
    /// at the top goes to sudden death; if the top is a single candidate
    /// without a majority, everyone tied for second place joins them so the
    /// tie-break always has at least two candidates.
    ///
    /// Panics on an empty tally: the game only tallies once every voter has
    /// voted, so zero ballots means the round bookkeeping is broken.
    #[must_use]
    pub fn outcome(&self) -> TallyOutcome {
        let top = match self.standings.first() {
            Some(top) => *top,
            None => panic!("Tallied a round with no ballots"),
        };

        if top.votes * 2 > self.ballots_cast {
            return TallyOutcome::Majority(top.candidate);
        }

        let mut candidates: UserSet = self.tied_at(top.votes).collect();
        if candidates.len() < 2 {
            // Without a majority at least one other candidate got votes.
            let runner_up = self.standings[1].votes;
            candidates.extend(self.tied_at(runner_up));
        }
        TallyOutcome::SuddenDeath(candidates)
    }

    fn tied_at(&self, votes: usize) -> impl Iterator<Item = UserId> + '_ {
        self.standings
            .iter()
            .filter(move |s| s.votes == votes)
            .map(|s| s.candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> UserId {
        UserId::from_u128(n)
    }

    fn set(ids: &[u128]) -> UserSet {
        ids.iter().map(|&n| uid(n)).collect()
    }

    #[test]
    fn test_count_and_rank() {
        let tally = Tally::count([uid(2), uid(1), uid(2), uid(3), uid(2)]);

        assert_eq!(tally.ballots_cast(), 5);
        assert_eq!(tally.standings()[0], Standing { candidate: uid(2), votes: 3 });
        assert_eq!(tally.votes_for(uid(1)), 1);
        assert_eq!(tally.votes_for(uid(9)), 0);
    }

    #[test]
    fn test_equal_counts_rank_by_id() {
        let tally = Tally::count([uid(3), uid(1), uid(2)]);
        let order: Vec<_> = tally.standings().iter().map(|s| s.candidate).collect();
        assert_eq!(order, vec![uid(1), uid(2), uid(3)]);
    }

    #[test]
    fn test_majority() {
        // 3 of 5
        let tally = Tally::count([uid(1), uid(1), uid(1), uid(2), uid(3)]);
        assert_eq!(tally.outcome(), TallyOutcome::Majority(uid(1)));
    }

    #[test]
    fn test_unanimous() {
        let tally = Tally::count([uid(4)]);
        assert_eq!(tally.outcome(), TallyOutcome::Majority(uid(4)));
    }

    #[test]
    fn test_exact_half_is_not_majority() {
        let tally = Tally::count([uid(1), uid(1), uid(2), uid(2)]);
        assert_eq!(tally.outcome(), TallyOutcome::SuddenDeath(set(&[1, 2])));
    }

    #[test]
    fn test_three_way_tie() {
        let tally = Tally::count([uid(1), uid(2), uid(3)]);
        assert_eq!(tally.outcome(), TallyOutcome::SuddenDeath(set(&[1, 2, 3])));
    }

    #[test]
    fn test_plurality_without_majority_pulls_in_runners_up() {
        // 2-1-1 of 4: top has no majority and no one ties it
        let tally = Tally::count([uid(1), uid(1), uid(2), uid(3)]);
        assert_eq!(tally.outcome(), TallyOutcome::SuddenDeath(set(&[1, 2, 3])));
    }

    #[test]
    fn test_lone_leader_takes_whole_runner_up_group() {
        // 2-1-1-1 of 5: all three runners-up join, not just the first by ID
        let tally = Tally::count([uid(4), uid(4), uid(3), uid(2), uid(1)]);
        assert_eq!(tally.outcome(), TallyOutcome::SuddenDeath(set(&[1, 2, 3, 4])));
    }

    #[test]
    fn test_plurality_with_single_runner_up() {
        // 3-2-1 of 6
        let tally = Tally::count([uid(1), uid(1), uid(1), uid(2), uid(2), uid(3)]);
        assert_eq!(tally.outcome(), TallyOutcome::SuddenDeath(set(&[1, 2])));
    }

    #[test]
    #[should_panic(expected = "Tallied a round with no ballots")]
    fn test_empty_tally_panics() {
        let _ = Tally::count(std::iter::empty()).outcome();
    }
}
