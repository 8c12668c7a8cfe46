//! Move representation and history records.
//!
//! A [`PawnMove`] is a resolved transition: which pawn, where it stands, and
//! where the roll takes it. Legal moves are computed up front, so executing
//! one never has to re-derive its destination.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::PAWNS_PER_PLAYER;
use super::pawn::{PawnId, PawnState};
use super::player::PlayerId;

/// A legal move for one pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PawnMove {
    pub pawn: PawnId,
    pub from: PawnState,
    pub to: PawnState,
}

/// Legal moves for one player, in pawn index order.
pub type MoveList = SmallVec<[PawnMove; PAWNS_PER_PLAYER]>;

/// A set of pawns, e.g. selection candidates or captured pawns.
///
/// Inline storage covers a whole player's pawns without heap allocation.
pub type PawnSet = SmallVec<[PawnId; PAWNS_PER_PLAYER]>;

/// An executed move, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// Die value that produced the move.
    pub roll: u8,

    pub pawn: PawnId,
    pub from: PawnState,
    pub to: PawnState,

    /// Opposing pawns sent back home by this move.
    pub captured: PawnSet,

    /// Turn number when the move was made.
    pub turn: u32,
}
