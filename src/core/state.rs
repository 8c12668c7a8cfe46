//! Game state.
//!
//! ## GameState
//!
//! Everything that changes during a game:
//! - Players and their pawns (turn order = seat order)
//! - Current player
//! - Pending pawn selection, if a roll produced several legal moves
//! - Winner, once the game is over
//! - Turn counter and move history
//!
//! The state is owned by a [`TurnEngine`](crate::rules::TurnEngine) and only
//! mutated through its roll and selection transitions. Everything public here
//! is a query.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::moves::{MoveList, MoveRecord, PawnSet};
use super::pawn::{Pawn, PawnId, PawnState, PawnView};
use super::player::{Player, PlayerId};

/// Where the turn protocol stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    Idle,
    /// A roll produced several legal moves; waiting for a pawn selection.
    AwaitingSelection,
    /// A player has won. Terminal.
    GameOver,
}

/// Legal moves held while the current player picks a pawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChoice {
    /// The roll the moves were computed for.
    pub roll: u8,

    /// At least two moves, in pawn index order.
    pub moves: MoveList,
}

impl PendingChoice {
    /// Pawns the player may select.
    #[must_use]
    pub fn candidates(&self) -> PawnSet {
        self.moves.iter().map(|m| m.pawn).collect()
    }

    #[must_use]
    pub fn is_candidate(&self, pawn: PawnId) -> bool {
        self.moves.iter().any(|m| m.pawn == pawn)
    }
}

/// Full game state.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    players: Vec<Player>,
    current: usize,
    pending: Option<PendingChoice>,
    winner: Option<PlayerId>,

    /// Turn number (starts at 1, bumps whenever the turn passes).
    turn: u32,

    /// Every executed move, oldest first.
    history: Vector<MoveRecord>,
}

impl GameState {
    /// Create a state for configured players.
    ///
    /// Callers guarantee at least one player and `current < players.len()`.
    pub(crate) fn new(players: Vec<Player>, current: usize) -> Self {
        debug_assert!(current < players.len());

        Self {
            players,
            current,
            pending: None,
            winner: None,
            turn: 1,
            history: Vector::new(),
        }
    }

    // === Players ===

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    // === Pawns ===

    #[must_use]
    pub fn pawn(&self, id: PawnId) -> Option<&Pawn> {
        self.player(id.player)?.pawn(id.index)
    }

    /// Logical position of a pawn, flattened for renderers.
    #[must_use]
    pub fn pawn_state(&self, id: PawnId) -> Option<PawnView> {
        self.pawn(id).map(|p| PawnView::from(p.state()))
    }

    /// Pawns of any player standing on a path square.
    pub fn pawns_at(&self, path_index: u8) -> impl Iterator<Item = &Pawn> + '_ {
        self.players
            .iter()
            .flat_map(|p| p.pawns().iter())
            .filter(move |p| p.state().path_index() == Some(path_index))
    }

    /// Overwrite a pawn's state. Returns false for an unknown pawn.
    pub(crate) fn set_pawn_state(&mut self, id: PawnId, state: PawnState) -> bool {
        match self
            .players
            .get_mut(id.player.index())
            .and_then(|p| p.pawn_mut(id.index))
        {
            Some(pawn) => {
                pawn.set_state(state);
                true
            }
            None => false,
        }
    }

    // === Turn protocol ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.winner.is_some() {
            TurnPhase::GameOver
        } else if self.pending.is_some() {
            TurnPhase::AwaitingSelection
        } else {
            TurnPhase::Idle
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingChoice> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending(&mut self, choice: PendingChoice) {
        self.pending = Some(choice);
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingChoice> {
        self.pending.take()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub(crate) fn set_winner(&mut self, player: PlayerId) {
        self.winner = Some(player);
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Hand the turn to the next player. Returns the new current player.
    pub(crate) fn advance_turn(&mut self) -> PlayerId {
        self.current = (self.current + 1) % self.players.len();
        self.turn += 1;
        self.players[self.current].id()
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, Color, PawnMove};

    fn two_players() -> GameState {
        let board = BoardConfig::standard();
        let players = vec![
            board.configure_player(PlayerId::new(0), Color::Red, 0).unwrap(),
            board.configure_player(PlayerId::new(1), Color::Blue, 13).unwrap(),
        ];
        GameState::new(players, 0)
    }

    #[test]
    fn test_new_state() {
        let state = two_players();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.current_player().color(), Color::Red);
        assert_eq!(state.phase(), TurnPhase::Idle);
        assert_eq!(state.turn(), 1);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = two_players();

        assert_eq!(state.advance_turn(), PlayerId::new(1));
        assert_eq!(state.advance_turn(), PlayerId::new(0));
        assert_eq!(state.turn(), 3);
    }

    #[test]
    fn test_set_pawn_state_and_query() {
        let mut state = two_players();
        let pawn = PawnId::new(PlayerId::new(1), 2);

        assert!(state.set_pawn_state(pawn, PawnState::Path { index: 20 }));
        assert_eq!(state.pawn(pawn).unwrap().state(), PawnState::Path { index: 20 });
        assert_eq!(state.pawns_at(20).count(), 1);

        let view = state.pawn_state(pawn).unwrap();
        assert_eq!(view.path_index, Some(20));

        assert!(!state.set_pawn_state(PawnId::new(PlayerId::new(5), 0), PawnState::Finished));
        assert!(state.pawn_state(PawnId::new(PlayerId::new(0), 9)).is_none());
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = two_players();
        let pawn = PawnId::new(PlayerId::new(0), 0);
        let mv = PawnMove {
            pawn,
            from: PawnState::Home { slot: 0 },
            to: PawnState::Path { index: 0 },
        };

        state.set_pending(PendingChoice {
            roll: 6,
            moves: [mv, mv].into_iter().collect(),
        });
        assert_eq!(state.phase(), TurnPhase::AwaitingSelection);
        assert!(state.pending().unwrap().is_candidate(pawn));

        assert!(state.take_pending().is_some());
        assert_eq!(state.phase(), TurnPhase::Idle);

        state.set_winner(PlayerId::new(0));
        assert_eq!(state.phase(), TurnPhase::GameOver);
    }
}
