//! Error types for the ito bot

use crate::core::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItoError {
    #[error("Player already registered: {0}")]
    AlreadyRegistered(UserId),

    #[error("Player not registered: {0}")]
    NotRegistered(UserId),

    #[error("Not allowed while the game is {0}")]
    WrongPhase(crate::game::Phase),

    #[error("{setting} must be between {min} and {max} (got {value})")]
    OutOfRange {
        setting: &'static str,
        value: i64,
        min: u8,
        max: u8,
    },

    #[error("At least {required} players are needed (have {actual})")]
    NotEnoughPlayers { required: usize, actual: usize },

    #[error("Cannot deal {needed} distinct cards from a deck of {available}")]
    DeckExhausted { needed: usize, available: usize },

    #[error("Invalid deal: {0}")]
    InvalidDeal(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ItoError>;
