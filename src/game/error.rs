//! Errors returned by game operations.
//!
//! Every variant is a rejected request: the game is left exactly as it was.

use thiserror::Error;

use crate::core::{GameId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("user {0} does not need to give a clue right now")]
    NotEligible(UserId),

    #[error("user {0} already gave a clue this round and cannot change it")]
    AlreadySubmitted(UserId),

    #[error("clue text is empty")]
    EmptyClue,

    #[error("user {0} is not allowed to vote now")]
    NotAllowedToVote(UserId),

    #[error("everyone needs to submit their clues before voting")]
    CluesIncomplete,

    #[error("user {0} is not up for elimination")]
    InvalidTarget(UserId),

    #[error("the game is already over")]
    GameOver,

    #[error("user {0} is not an active player in this game")]
    NotActivePlayer(UserId),

    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("user {0} appears more than once among players and observers")]
    DuplicateUser(UserId),

    #[error("no game with id {0}")]
    UnknownGame(GameId),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
