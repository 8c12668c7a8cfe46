//! Error types.
//!
//! Errors fall in two groups:
//! - [`ConfigError`]: fatal, raised once while a game is being set up.
//! - [`TurnError`]: a roll was requested in a state that cannot accept one.
//!   This points at a bug in the caller and is never silently ignored.
//!
//! Misdirected pawn selections are not errors; the engine ignores them and
//! reports [`Selection::Ignored`](crate::rules::Selection::Ignored).

use std::path::PathBuf;

use crate::core::{BoardCell, Color, PawnId};

/// Errors raised while validating a board or configuring players.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no slot sets registered for color {0}")]
    UnknownColor(Color),

    #[error("color {0} has more than one registered layout")]
    DuplicateLayout(Color),

    #[error("color {0} is seated more than once")]
    DuplicateColor(Color),

    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("{first} and {second} share start square {start}")]
    DuplicateStart { start: u8, first: Color, second: Color },

    #[error("start square {start} of {color} is not a safe square")]
    UnsafeStart { color: Color, start: u8 },

    #[error("start square {start} of {color} is off the path")]
    StartOutOfRange { color: Color, start: u8 },

    #[error("safe square {0} is off the path")]
    SafeSquareOutOfRange(u8),

    #[error("{color} slot {cell} lies on the shared path")]
    SlotOnPath { color: Color, cell: BoardCell },

    #[error("{cell} is assigned to more than one slot")]
    OverlappingSlots { cell: BoardCell },

    #[error("starting player {index} does not exist ({player_count} players)")]
    StartingPlayerOutOfRange { index: usize, player_count: usize },

    #[error("invalid placement for {pawn}: {reason}")]
    InvalidPlacement { pawn: PawnId, reason: &'static str },

    #[error("every pawn of {0} is already finished")]
    AlreadyFinished(Color),

    #[error("failed to read board config from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse board config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors returned by [`TurnEngine::request_roll`](crate::rules::TurnEngine::request_roll).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the game is over, {winner} has won")]
    GameOver { winner: Color },

    #[error("a pawn selection for roll {roll} is still pending")]
    AwaitingSelection { roll: u8 },

    #[error("dice produced {roll}, expected a value between 1 and 6")]
    InvalidRoll { roll: u8 },
}
