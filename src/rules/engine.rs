//! Turn engine.
//!
//! The [`TurnEngine`] owns one game and drives its turn protocol:
//!
//! ```text
//!            request_roll                     select_pawn
//!   Idle ───────────────► 0 or 1 legal moves ──────────────► Idle / GameOver
//!     │                                                 ▲
//!     └──────────────► AwaitingSelection ───────────────┘
//!          2+ moves         (suspended)
//! ```
//!
//! With zero or one legal moves the roll resolves synchronously. With two or
//! more the engine stores the moves and returns; the caller presents the
//! candidates and calls [`TurnEngine::select_pawn`]. Nothing blocks while the
//! engine waits.
//!
//! ## Turn order
//!
//! The turn passes to the next seat after every roll except a 6, which lets
//! the same player roll again. A win ends the game immediately.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{
    BoardConfig, Color, Dice, GameRng, GameState, MoveList, MoveRecord, PawnId, PawnMove,
    PawnSet, PawnState, PawnView, PendingChoice, Player, PlayerId, TurnPhase, DIE_FACES,
};
use crate::error::TurnError;
use crate::events::{GameEvent, GameObserver};

use super::capture::resolve_captures;
use super::movement::{is_valid_roll, legal_moves};

/// Result of executing a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub pawn: PawnId,
    pub from: PawnState,
    pub to: PawnState,

    /// Opposing pawns sent back home.
    pub captured: PawnSet,

    /// True if the mover rolls again.
    pub keeps_turn: bool,

    /// Set when this move won the game.
    pub winner: Option<Color>,
}

/// What a roll led to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RollOutcome {
    /// No pawn could move.
    NoMove,
    /// Exactly one pawn could move, and it did.
    AutoMoved(MoveResult),
    /// Several pawns can move; call [`TurnEngine::select_pawn`] with one of these.
    AwaitingChoice(PawnSet),
}

/// A rolled value and its outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RollResult {
    pub roll: u8,
    pub outcome: RollOutcome,
}

/// Result of a pawn selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Selection {
    /// No selection was pending, or the pawn was not a candidate. Nothing
    /// changed.
    Ignored,
    Moved(MoveResult),
}

impl Selection {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Selection::Ignored)
    }
}

/// Drives one game.
///
/// Build with [`GameBuilder`](super::GameBuilder).
pub struct TurnEngine<D = GameRng> {
    board: BoardConfig,
    state: GameState,
    dice: D,
    observers: Vec<Box<dyn GameObserver>>,
}

impl<D: Dice> TurnEngine<D> {
    pub(crate) fn new(board: BoardConfig, state: GameState, dice: D) -> Self {
        Self {
            board,
            state,
            dice,
            observers: Vec::new(),
        }
    }

    /// Register an observer for game events.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.winner().is_some()
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.state.current_player()
    }

    #[must_use]
    pub fn pawn_state(&self, pawn: PawnId) -> Option<PawnView> {
        self.state.pawn_state(pawn)
    }

    #[must_use]
    pub fn pending_choice(&self) -> Option<&PendingChoice> {
        self.state.pending()
    }

    /// Color of the winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.state
            .winner()
            .and_then(|id| self.state.player(id))
            .map(Player::color)
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<MoveRecord> {
        self.state.history()
    }

    /// Moves the current player would have for `roll`. Does not change state.
    #[must_use]
    pub fn legal_moves(&self, roll: u8) -> MoveList {
        legal_moves(self.state.current_player(), roll)
    }

    // === Transitions ===

    /// Roll the die for the current player and resolve what can be resolved.
    ///
    /// Fails without drawing a roll if the game is over or a selection is
    /// pending. A drawn value that is not a die face is rejected and leaves the
    /// state untouched.
    pub fn request_roll(&mut self) -> Result<RollResult, TurnError> {
        if let Some(winner) = self.winner() {
            warn!(%winner, "roll requested after game over");
            return Err(TurnError::GameOver { winner });
        }
        if let Some(pending) = self.state.pending() {
            warn!(roll = pending.roll, "roll requested while a selection is pending");
            return Err(TurnError::AwaitingSelection { roll: pending.roll });
        }

        let roll = self.dice.roll();
        if !is_valid_roll(roll) {
            warn!(roll, "dice produced an invalid roll");
            return Err(TurnError::InvalidRoll { roll });
        }

        let player = self.state.current_player();
        let color = player.color();
        let moves = legal_moves(player, roll);
        debug!(player = %color, roll, legal = moves.len(), "rolled");
        self.emit(GameEvent::Rolled { player: color, roll });

        let outcome = match moves.len() {
            0 => {
                if roll != DIE_FACES {
                    self.pass_turn();
                }
                RollOutcome::NoMove
            }
            1 => RollOutcome::AutoMoved(self.execute(moves[0], roll)),
            _ => {
                let choice = PendingChoice { roll, moves };
                let candidates = choice.candidates();
                debug!(player = %color, roll, candidates = candidates.len(), "awaiting selection");
                self.state.set_pending(choice);
                RollOutcome::AwaitingChoice(candidates)
            }
        };

        Ok(RollResult { roll, outcome })
    }

    /// Resolve a pending choice by moving `pawn`.
    ///
    /// Ignored, with no state change, if no choice is pending or `pawn` is not
    /// one of the current player's candidates.
    pub fn select_pawn(&mut self, pawn: PawnId) -> Selection {
        let Some(pending) = self.state.pending() else {
            debug!(%pawn, "selection ignored: nothing pending");
            return Selection::Ignored;
        };
        let chosen = pending.moves.iter().find(|m| m.pawn == pawn).copied();
        let roll = pending.roll;

        match chosen {
            Some(mv) if pawn.player == self.state.current_player().id() => {
                self.state.take_pending();
                Selection::Moved(self.execute(mv, roll))
            }
            _ => {
                debug!(%pawn, "selection ignored: not a candidate");
                Selection::Ignored
            }
        }
    }

    // === Internals ===

    fn execute(&mut self, mv: PawnMove, roll: u8) -> MoveResult {
        let mover = mv.pawn.player;
        self.state.set_pawn_state(mv.pawn, mv.to);

        let captured = match mv.to {
            PawnState::Path { index } => {
                resolve_captures(&mut self.state, &self.board, mover, index)
            }
            _ => PawnSet::new(),
        };

        debug!(
            pawn = %mv.pawn,
            roll,
            from = ?mv.from,
            to = ?mv.to,
            captured = captured.len(),
            "moved"
        );
        self.emit(GameEvent::Moved {
            pawn: mv.pawn,
            from: mv.from,
            to: mv.to,
            roll,
        });
        if let Some(square) = mv.to.path_index() {
            for &pawn in &captured {
                debug!(%pawn, by = %mv.pawn, square, "captured");
                self.emit(GameEvent::Captured {
                    pawn,
                    by: mv.pawn,
                    square,
                });
            }
        }

        self.state.record(MoveRecord {
            player: mover,
            roll,
            pawn: mv.pawn,
            from: mv.from,
            to: mv.to,
            captured: captured.clone(),
            turn: self.state.turn(),
        });

        let winner = self.check_winner(mover);
        let keeps_turn = winner.is_none() && roll == DIE_FACES;
        if winner.is_none() && !keeps_turn {
            self.pass_turn();
        }

        MoveResult {
            pawn: mv.pawn,
            from: mv.from,
            to: mv.to,
            captured,
            keeps_turn,
            winner,
        }
    }

    fn check_winner(&mut self, mover: PlayerId) -> Option<Color> {
        let player = self.state.player(mover)?;
        if !player.has_finished() {
            return None;
        }

        let winner = player.color();
        self.state.set_winner(mover);
        info!(%winner, turn = self.state.turn(), "game over");
        self.emit(GameEvent::GameOver { winner });
        for observer in &mut self.observers {
            observer.on_game_over(winner);
        }
        Some(winner)
    }

    fn pass_turn(&mut self) {
        let from = self.state.current_player().color();
        let next = self.state.advance_turn();
        let to = self.state.current_player().color();
        debug!(%from, %to, player = %next, "turn passed");
        self.emit(GameEvent::TurnPassed { from, to });
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl<D> std::fmt::Debug for TurnEngine<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;
    use crate::rules::GameBuilder;

    fn pawn(player: u8, index: u8) -> PawnId {
        PawnId::new(PlayerId::new(player), index)
    }

    fn two_player() -> GameBuilder {
        GameBuilder::new().player(Color::Red).player(Color::Blue)
    }

    #[test]
    fn test_no_move_passes_turn() {
        let mut engine = two_player().build_with_dice(ScriptedDice::new([3])).unwrap();

        let result = engine.request_roll().unwrap();

        assert_eq!(result.roll, 3);
        assert_eq!(result.outcome, RollOutcome::NoMove);
        assert_eq!(engine.current_player().color(), Color::Blue);
        assert_eq!(engine.state().turn(), 2);
    }

    #[test]
    fn test_no_move_on_six_keeps_turn() {
        // Every red pawn sits deep in the home column, where a 6 overshoots
        let mut engine = two_player()
            .place(pawn(0, 0), PawnState::HomeColumn { step: 1 })
            .place(pawn(0, 1), PawnState::HomeColumn { step: 2 })
            .place(pawn(0, 2), PawnState::Finished)
            .place(pawn(0, 3), PawnState::Finished)
            .build_with_dice(ScriptedDice::new([6]))
            .unwrap();

        let result = engine.request_roll().unwrap();

        assert_eq!(result.outcome, RollOutcome::NoMove);
        assert_eq!(engine.current_player().color(), Color::Red);
    }

    #[test]
    fn test_single_move_executes_immediately() {
        let mut engine = two_player()
            .place(pawn(0, 1), PawnState::Path { index: 10 })
            .build_with_dice(ScriptedDice::new([4]))
            .unwrap();

        let result = engine.request_roll().unwrap();

        match result.outcome {
            RollOutcome::AutoMoved(mv) => {
                assert_eq!(mv.pawn, pawn(0, 1));
                assert_eq!(mv.from, PawnState::Path { index: 10 });
                assert_eq!(mv.to, PawnState::Path { index: 14 });
                assert!(!mv.keeps_turn);
            }
            other => panic!("Expected AutoMoved, got {other:?}"),
        }
        assert_eq!(engine.phase(), TurnPhase::Idle);
        assert_eq!(engine.current_player().color(), Color::Blue);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_selection_outside_window_is_ignored() {
        let mut engine = two_player().build_with_dice(ScriptedDice::new([6])).unwrap();

        assert!(engine.select_pawn(pawn(0, 0)).is_ignored());
        assert_eq!(engine.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_roll_while_pending_is_rejected() {
        let mut engine = two_player().build_with_dice(ScriptedDice::new([6, 1])).unwrap();

        let result = engine.request_roll().unwrap();
        assert!(matches!(result.outcome, RollOutcome::AwaitingChoice(_)));

        assert_eq!(
            engine.request_roll(),
            Err(TurnError::AwaitingSelection { roll: 6 })
        );
        assert_eq!(engine.phase(), TurnPhase::AwaitingSelection);
    }

    #[test]
    fn test_legal_moves_query_has_no_side_effects() {
        let engine = two_player().build_with_dice(ScriptedDice::new([1])).unwrap();

        assert_eq!(engine.legal_moves(6).len(), 4);
        assert!(engine.legal_moves(5).is_empty());
        assert_eq!(engine.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_debug_output() {
        let engine = two_player().build_with_dice(ScriptedDice::new([1])).unwrap();
        let debug = format!("{engine:?}");
        assert!(debug.starts_with("TurnEngine"));
    }

    /// Dice that always produce the same value, valid or not.
    struct Loaded(u8);

    impl Dice for Loaded {
        fn roll(&mut self) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_invalid_roll_is_rejected_without_side_effects() {
        for value in [0, 7, 250] {
            let log = crate::events::EventLog::new();
            let mut engine = two_player()
                .place(pawn(0, 0), PawnState::Path { index: 20 })
                .place(pawn(1, 0), PawnState::Path { index: 20 })
                .build_with_dice(Loaded(value))
                .unwrap();
            engine.add_observer(Box::new(log.clone()));

            assert_eq!(engine.request_roll(), Err(TurnError::InvalidRoll { roll: value }));

            assert_eq!(engine.state().pawns_at(20).count(), 2);
            assert_eq!(engine.phase(), TurnPhase::Idle);
            assert_eq!(engine.current_player().color(), Color::Red);
            assert!(engine.history().is_empty());
            assert!(log.is_empty());
            assert!(engine.legal_moves(value).is_empty());
        }
    }
}
