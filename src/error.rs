use thiserror::Error;

use crate::card::Card;
use crate::game_state::Phase;

/// Errors a driver can recover from by re-prompting.
///
/// Every operation that returns one of these leaves its receiver exactly as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Tried to start a game with {0} players (2-5 required)")]
    InvalidPlayerCount(usize),

    #[error("Tried to play {0} cards (1 or 2 required)")]
    InvalidPlayCount(usize),

    #[error("Playing two cards requires chopsticks in the field")]
    MissingChopsticks,

    #[error("Card {0} is not in hand and no unknown card can stand in for it")]
    UnknownCard(Card),

    #[error("Tried to draw {0} from the deck (not present)")]
    CardNotInDeck(Card),

    #[error("No seat {0} at this table")]
    InvalidSeat(usize),

    #[error("Seat {0} already played this turn")]
    AlreadyMoved(usize),

    #[error("Operation requires phase {expected:?}, game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Seat {seat} has {unknown} unknown cards, {revealed} were revealed")]
    UnresolvedCards {
        seat: usize,
        unknown: usize,
        revealed: usize,
    },

    #[error("Invalid card code: {0:?}")]
    InvalidCardCode(String),

    #[error("Invalid game snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures of the headless batch simulator
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
