//! Move legality.
//!
//! Pure functions of a pawn's state, its owner's geometry, and the roll.
//! Nothing here mutates state.

use crate::core::{
    MoveList, PawnMove, PawnState, Player, DIE_FACES, LAST_HOME_STEP, PATH_LEN,
};

/// Squares a path pawn can still walk before it has to turn into the home
/// column. Always in `0..PATH_LEN`.
#[must_use]
pub fn steps_to_entrance(path_index: u8, home_entrance: u8) -> u8 {
    (home_entrance + PATH_LEN - path_index) % PATH_LEN
}

/// Where a roll takes a pawn, or `None` if the move is not legal.
///
/// - Home: only a 6 moves the pawn, onto the player's start square.
/// - Path: moves along the path; once past the home entrance the remaining
///   steps continue into the home column, which must not be overshot.
/// - Home column: must not overshoot the last step.
/// - Finished: never moves.
///
/// A roll outside `1..=DIE_FACES` moves nothing.
#[must_use]
pub fn destination(state: PawnState, roll: u8, player: &Player) -> Option<PawnState> {
    if !is_valid_roll(roll) {
        return None;
    }

    match state {
        PawnState::Home { .. } => (roll == DIE_FACES).then(|| PawnState::Path {
            index: player.start_path(),
        }),
        PawnState::Path { index } => {
            let steps = steps_to_entrance(index, player.home_entrance());
            if roll <= steps {
                Some(PawnState::Path {
                    index: (index + roll) % PATH_LEN,
                })
            } else {
                let into_home = roll - steps - 1;
                (into_home <= LAST_HOME_STEP).then(|| PawnState::home_column(into_home))
            }
        }
        PawnState::HomeColumn { step } => {
            let next = step + roll;
            (next <= LAST_HOME_STEP).then(|| PawnState::home_column(next))
        }
        PawnState::Finished => None,
    }
}

/// Check whether a value is a face of the die.
#[must_use]
pub fn is_valid_roll(roll: u8) -> bool {
    (1..=DIE_FACES).contains(&roll)
}

/// Legal moves for a player, in pawn index order.
///
/// The order is what decides which pawn moves when there is exactly one.
#[must_use]
pub fn legal_moves(player: &Player, roll: u8) -> MoveList {
    player
        .pawns()
        .iter()
        .filter_map(|pawn| {
            let from = pawn.state();
            destination(from, roll, player).map(|to| PawnMove {
                pawn: pawn.id(),
                from,
                to,
            })
        })
        .collect()
}
