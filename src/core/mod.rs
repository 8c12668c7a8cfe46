//! Core engine types: colors, board geometry, pawns, players, state, dice.
//!
//! Everything here is rules-free data. The rules that move pawns live in
//! [`crate::rules`].

pub mod color;
pub mod config;
pub mod dice;
pub mod moves;
pub mod pawn;
pub mod player;
pub mod rng;
pub mod state;

pub use color::{Color, ParseColorError};
pub use config::{
    home_entrance, BoardCell, BoardConfig, ColorLayout, DIE_FACES, HOME_COLUMN_LEN,
    LAST_HOME_STEP, PATH_LEN, PAWNS_PER_PLAYER,
};
pub use dice::{Dice, ScriptedDice};
pub use moves::{MoveList, MoveRecord, PawnMove, PawnSet};
pub use pawn::{Pawn, PawnId, PawnState, PawnStateKind, PawnView};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use state::{GameState, PendingChoice, TurnPhase};
