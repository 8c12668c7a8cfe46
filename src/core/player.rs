//! Players and their seat geometry.
//!
//! ## PlayerId
//!
//! Seat index in turn order. The first player is `PlayerId(0)`.
//!
//! ## Player
//!
//! Owns exactly [`PAWNS_PER_PLAYER`] pawns plus the geometry resolved for its
//! color when the game was configured. The geometry never changes afterwards.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::config::{home_entrance, BoardCell, HOME_COLUMN_LEN, PAWNS_PER_PLAYER};
use super::pawn::{Pawn, PawnId, PawnState};

/// Player identifier: the seat index in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    color: Color,
    start_path: u8,
    home_entrance: u8,
    home_cells: [BoardCell; HOME_COLUMN_LEN as usize],
    staging_slots: [BoardCell; PAWNS_PER_PLAYER],
    pawns: [Pawn; PAWNS_PER_PLAYER],
}

impl Player {
    /// Create a player with all pawns in home.
    ///
    /// Use [`BoardConfig::configure_player`](super::BoardConfig::configure_player)
    /// to get a validated player.
    pub(crate) fn new(
        id: PlayerId,
        color: Color,
        start_path: u8,
        home_cells: [BoardCell; HOME_COLUMN_LEN as usize],
        staging_slots: [BoardCell; PAWNS_PER_PLAYER],
    ) -> Self {
        Self {
            id,
            color,
            start_path,
            home_entrance: home_entrance(start_path),
            home_cells,
            staging_slots,
            pawns: std::array::from_fn(|i| Pawn::new(PawnId::new(id, i as u8))),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Path square a pawn enters on when leaving home.
    #[must_use]
    pub fn start_path(&self) -> u8 {
        self.start_path
    }

    /// Path square just before this player's home column.
    #[must_use]
    pub fn home_entrance(&self) -> u8 {
        self.home_entrance
    }

    #[must_use]
    pub fn home_cells(&self) -> &[BoardCell; HOME_COLUMN_LEN as usize] {
        &self.home_cells
    }

    #[must_use]
    pub fn staging_slots(&self) -> &[BoardCell; PAWNS_PER_PLAYER] {
        &self.staging_slots
    }

    /// Pawns in fixed index order.
    #[must_use]
    pub fn pawns(&self) -> &[Pawn; PAWNS_PER_PLAYER] {
        &self.pawns
    }

    #[must_use]
    pub fn pawn(&self, index: u8) -> Option<&Pawn> {
        self.pawns.get(usize::from(index))
    }

    pub(crate) fn pawn_mut(&mut self, index: u8) -> Option<&mut Pawn> {
        self.pawns.get_mut(usize::from(index))
    }

    /// Check whether a pawn ID refers to one of this player's pawns.
    #[must_use]
    pub fn owns(&self, pawn: PawnId) -> bool {
        pawn.player == self.id && usize::from(pawn.index) < PAWNS_PER_PLAYER
    }

    /// Number of pawns that reached the end of the home column.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.pawns.iter().filter(|p| p.state().is_finished()).count()
    }

    /// True once every pawn is finished.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.finished_count() == PAWNS_PER_PLAYER
    }

    /// Lowest staging slot not held by a pawn in home.
    ///
    /// Falls back to slot 0 when every slot is taken.
    #[must_use]
    pub fn free_staging_slot(&self) -> u8 {
        (0..PAWNS_PER_PLAYER as u8)
            .find(|&slot| {
                !self
                    .pawns
                    .iter()
                    .any(|p| p.state().staging_slot() == Some(slot))
            })
            .unwrap_or(0)
    }

    /// Board cell for a pawn of this player in the given state.
    ///
    /// Path squares map to the board cell with the same number.
    #[must_use]
    pub fn cell_for(&self, state: PawnState) -> BoardCell {
        match state {
            PawnState::Home { slot } => self
                .staging_slots
                .get(usize::from(slot))
                .copied()
                .unwrap_or(self.staging_slots[0]),
            PawnState::Path { index } => BoardCell(u16::from(index)),
            PawnState::HomeColumn { step } => self
                .home_cells
                .get(usize::from(step))
                .copied()
                .unwrap_or(self.home_cells[0]),
            PawnState::Finished => self.home_cells[HOME_COLUMN_LEN as usize - 1],
        }
    }
}
