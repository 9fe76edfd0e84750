//! "I am the orange": the impostor's final guess, or an apple's mistake.
//!
//! Declaring is allowed at any point of a round. For the real impostor it
//! ends the game either way. For anyone else it only takes them out.

use tracing::info;

use super::aggregate::Game;
use super::error::{GameError, GameResult};
use super::win::{Win, WinReason};
use crate::core::{Clock, UserId};
use crate::log::{EventType, LogEvent};

impl Game {
    /// `player` claims to be the impostor and guesses the primary word.
    ///
    /// The guess matches when it equals the primary word after trimming and
    /// case folding.
    pub fn declare_impostor(&mut self, player: UserId, guess: &str, clock: &dyn Clock) -> GameResult<()> {
        self.ensure_in_progress()?;
        if !self.current_round().is_still_in(player) {
            return Err(GameError::NotActivePlayer(player));
        }

        let now = clock.now();
        self.touch(now);

        if player == self.alt_player() {
            if self.words().is_primary(guess) {
                self.record(LogEvent::new(EventType::OrangeGuessedRight).with_user(player).with_guess(guess));
                self.finish(Win::new([player], WinReason::OrangeGuessedApple));
            } else {
                let others: Vec<_> = self.active_players().filter(|p| *p != player).collect();
                self.record(LogEvent::new(EventType::OrangeGuessedWrong).with_user(player).with_guess(guess));
                self.finish(Win::new(others, WinReason::OrangeGuessedWrong));
            }
            return Ok(());
        }

        self.current_round_mut().withdraw(player);
        self.record(
            LogEvent::new(EventType::AppleThoughtItWasTheOrange)
                .with_user(player)
                .with_guess(guess),
        );
        info!(game = %self.id(), user = %player, "apple withdrew thinking they were the orange");

        let round = self.current_round();
        if round.is_sudden_death() && round.players_giving_clues().is_empty() {
            // Every tie-break candidate withdrew; nobody is left to vote on.
            let still_in = round.players_still_in().clone();
            let voting = round.users_voting().clone();
            self.start_round(still_in, voting, now);
            return Ok(());
        }

        self.advance(now);
        Ok(())
    }
}
