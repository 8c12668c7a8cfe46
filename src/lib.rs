//! # ludo-engine
//!
//! A rules engine for Ludo: pawn movement, captures, safe squares, home
//! columns, turn order and win detection for two to four players.
//!
//! ## Design Principles
//!
//! 1. **Rules Only**: No rendering or input handling. Callers drive the
//!    engine with rolls and pawn selections and read state back.
//!
//! 2. **Non-Blocking Turns**: When a roll leaves the player a choice, the
//!    engine records the legal moves and returns. The choice is resolved by a
//!    later call, so nothing waits on user input.
//!
//! 3. **Configuration Over Convention**: Start squares, safe squares and
//!    per-color cells come from a [`BoardConfig`], loadable from JSON.
//!
//! ## Example
//!
//! ```
//! use ludo_engine::{Color, GameBuilder, RollOutcome};
//!
//! let mut engine = GameBuilder::new()
//!     .player(Color::Red)
//!     .player(Color::Green)
//!     .build(7)
//!     .unwrap();
//!
//! while !engine.is_over() {
//!     let rolled = engine.request_roll().unwrap();
//!     if let RollOutcome::AwaitingChoice(candidates) = rolled.outcome {
//!         engine.select_pawn(candidates[0]);
//!     }
//! }
//! assert!(engine.winner().is_some());
//! ```
//!
//! ## Modules
//!
//! - `core`: Colors, board geometry, pawns, players, state, dice
//! - `rules`: Movement, captures, the turn engine and game setup
//! - `events`: Events and observers
//! - `error`: Configuration and turn errors

pub mod core;
pub mod error;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BoardCell, BoardConfig, Color, ColorLayout, Dice, GameRng, GameState, MoveRecord, Pawn,
    PawnId, PawnState, PawnView, PendingChoice, Player, PlayerId, ScriptedDice, TurnPhase,
};

pub use crate::error::{ConfigError, TurnError};

pub use crate::events::{EventLog, GameEvent, GameObserver};

pub use crate::rules::{
    legal_moves, GameBuilder, MoveResult, RollOutcome, RollResult, Selection, TurnEngine,
};
