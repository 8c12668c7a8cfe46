//! Pawns and their logical positions.
//!
//! A pawn moves forward through four states:
//!
//! ```text
//! Home --(6)--> Path --(past home entrance)--> HomeColumn --(step 5)--> Finished
//!   ^            |
//!   +--capture---+
//! ```
//!
//! The position data lives inside the state, so a pawn on the path always has
//! a path index and never a home step, and vice versa. Visual placement is
//! derived from this state, never stored alongside it.

use serde::{Deserialize, Serialize};

use super::config::LAST_HOME_STEP;
use super::player::PlayerId;

/// Identifies a pawn: its owner plus its fixed index (0..4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PawnId {
    pub player: PlayerId,
    pub index: u8,
}

impl PawnId {
    #[must_use]
    pub const fn new(player: PlayerId, index: u8) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pawn {}", self.player, self.index)
    }
}

/// Logical position of a pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PawnState {
    /// Off the board, waiting in one of the owner's staging slots.
    Home { slot: u8 },
    /// On the shared path.
    Path { index: u8 },
    /// In the owner's home column, short of the last step.
    HomeColumn { step: u8 },
    /// At the end of the home column. Terminal.
    Finished,
}

impl PawnState {
    /// State for a pawn at `step` of its home column.
    ///
    /// The last step is [`PawnState::Finished`].
    #[must_use]
    pub const fn home_column(step: u8) -> Self {
        if step >= LAST_HOME_STEP {
            PawnState::Finished
        } else {
            PawnState::HomeColumn { step }
        }
    }

    #[must_use]
    pub const fn kind(self) -> PawnStateKind {
        match self {
            PawnState::Home { .. } => PawnStateKind::Home,
            PawnState::Path { .. } => PawnStateKind::Path,
            PawnState::HomeColumn { .. } => PawnStateKind::HomeColumn,
            PawnState::Finished => PawnStateKind::Finished,
        }
    }

    #[must_use]
    pub const fn path_index(self) -> Option<u8> {
        match self {
            PawnState::Path { index } => Some(index),
            _ => None,
        }
    }

    /// Home step; a finished pawn is at the last step.
    #[must_use]
    pub const fn home_step(self) -> Option<u8> {
        match self {
            PawnState::HomeColumn { step } => Some(step),
            PawnState::Finished => Some(LAST_HOME_STEP),
            _ => None,
        }
    }

    #[must_use]
    pub const fn staging_slot(self) -> Option<u8> {
        match self {
            PawnState::Home { slot } => Some(slot),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        matches!(self, PawnState::Home { .. })
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, PawnState::Finished)
    }
}

/// Pawn state without position data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PawnStateKind {
    Home,
    Path,
    HomeColumn,
    Finished,
}

/// Flattened pawn position for renderers.
///
/// Exactly the field matching `state` is set; `home_step` is also set for a
/// finished pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PawnView {
    pub state: PawnStateKind,
    pub path_index: Option<u8>,
    pub home_step: Option<u8>,
    pub staging_slot: Option<u8>,
}

impl From<PawnState> for PawnView {
    fn from(state: PawnState) -> Self {
        Self {
            state: state.kind(),
            path_index: state.path_index(),
            home_step: state.home_step(),
            staging_slot: state.staging_slot(),
        }
    }
}

/// A pawn owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pawn {
    id: PawnId,
    state: PawnState,
}

impl Pawn {
    /// A new pawn in home, in the staging slot matching its index.
    pub(crate) fn new(id: PawnId) -> Self {
        Self {
            id,
            state: PawnState::Home { slot: id.index },
        }
    }

    #[must_use]
    pub fn id(&self) -> PawnId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> PawnState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PawnState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_column_collapses_to_finished() {
        assert_eq!(PawnState::home_column(0), PawnState::HomeColumn { step: 0 });
        assert_eq!(PawnState::home_column(4), PawnState::HomeColumn { step: 4 });
        assert_eq!(PawnState::home_column(5), PawnState::Finished);
    }

    #[test]
    fn test_position_fields_match_state() {
        let home = PawnState::Home { slot: 2 };
        assert_eq!(home.path_index(), None);
        assert_eq!(home.home_step(), None);
        assert_eq!(home.staging_slot(), Some(2));

        let path = PawnState::Path { index: 30 };
        assert_eq!(path.path_index(), Some(30));
        assert_eq!(path.home_step(), None);

        let column = PawnState::HomeColumn { step: 3 };
        assert_eq!(column.path_index(), None);
        assert_eq!(column.home_step(), Some(3));

        assert_eq!(PawnState::Finished.home_step(), Some(5));
        assert!(PawnState::Finished.is_finished());
    }

    #[test]
    fn test_pawn_view() {
        let view = PawnView::from(PawnState::Path { index: 7 });
        assert_eq!(view.state, PawnStateKind::Path);
        assert_eq!(view.path_index, Some(7));
        assert_eq!(view.home_step, None);
        assert_eq!(view.staging_slot, None);

        let json = serde_json::to_value(PawnView::from(PawnState::Finished)).unwrap();
        assert_eq!(json["state"], "finished");
        assert_eq!(json["homeStep"], 5);
        assert!(json["pathIndex"].is_null());
    }

    #[test]
    fn test_new_pawn_uses_own_slot() {
        let pawn = Pawn::new(PawnId::new(PlayerId::new(1), 3));
        assert_eq!(pawn.state(), PawnState::Home { slot: 3 });
    }

    #[test]
    fn test_pawn_id_display() {
        let id = PawnId::new(PlayerId::new(2), 1);
        assert_eq!(id.to_string(), "Player 2 pawn 1");
    }
}
