//! Game rules.
//!
//! - `movement`: which moves a roll permits (pure)
//! - `capture`: sending opposing pawns home
//! - `engine`: the turn protocol
//! - `builder`: seating players and validating setup

mod builder;
mod capture;
pub mod engine;
pub mod movement;

pub use builder::GameBuilder;
pub use engine::{MoveResult, RollOutcome, RollResult, Selection, TurnEngine};
pub use movement::{destination, is_valid_roll, legal_moves, steps_to_entrance};
