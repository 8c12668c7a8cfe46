//! Capture resolution.

use crate::core::{BoardConfig, GameState, PawnSet, PawnState, PlayerId};

/// Send every opposing pawn on `landing` back home.
///
/// Nothing is captured on a safe square. Each captured pawn takes the lowest
/// free staging slot of its owner. Returns the captured pawns in seat and
/// pawn order.
pub(crate) fn resolve_captures(
    state: &mut GameState,
    board: &BoardConfig,
    mover: PlayerId,
    landing: u8,
) -> PawnSet {
    let mut captured = PawnSet::new();
    if board.is_safe(landing) {
        return captured;
    }

    for player in state.players_mut().iter_mut().filter(|p| p.id() != mover) {
        for index in 0..player.pawns().len() as u8 {
            let on_landing = player
                .pawn(index)
                .is_some_and(|p| p.state() == PawnState::Path { index: landing });
            if !on_landing {
                continue;
            }

            let slot = player.free_staging_slot();
            if let Some(pawn) = player.pawn_mut(index) {
                pawn.set_state(PawnState::Home { slot });
                captured.push(pawn.id());
            }
        }
    }

    captured
}
