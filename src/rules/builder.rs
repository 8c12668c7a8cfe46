//! Game setup.
//!
//! [`GameBuilder`] seats players on a board, validates the configuration
//! once, and hands back a ready [`TurnEngine`]. All configuration errors
//! surface here; nothing is re-checked during play.

use rustc_hash::FxHashSet;

use crate::core::{
    BoardConfig, Color, Dice, GameRng, GameState, PawnId, PawnState, Player, PlayerId,
    LAST_HOME_STEP, PATH_LEN, PAWNS_PER_PLAYER,
};
use crate::error::ConfigError;

use super::engine::TurnEngine;

#[derive(Clone, Copy, Debug)]
struct Seat {
    color: Color,
    start: Option<u8>,
}

/// Builder for a game.
///
/// ```
/// use ludo_engine::core::Color;
/// use ludo_engine::rules::GameBuilder;
///
/// let engine = GameBuilder::new()
///     .player(Color::Red)
///     .player(Color::Blue)
///     .build(42)
///     .unwrap();
///
/// assert_eq!(engine.current_player().color(), Color::Red);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    board: BoardConfig,
    seats: Vec<Seat>,
    starting_player: usize,
    placements: Vec<(PawnId, PawnState)>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom board instead of the standard one.
    pub fn board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Seat a player on its color's registered start square.
    ///
    /// Seats are taken in turn order.
    pub fn player(mut self, color: Color) -> Self {
        self.seats.push(Seat { color, start: None });
        self
    }

    /// Seat a player on an explicit start square.
    pub fn player_at(mut self, color: Color, start: u8) -> Self {
        self.seats.push(Seat {
            color,
            start: Some(start),
        });
        self
    }

    /// Seat index of the player who rolls first. Defaults to 0.
    pub fn starting_player(mut self, index: usize) -> Self {
        self.starting_player = index;
        self
    }

    /// Put a pawn in a given state before the game starts.
    ///
    /// A home column state at the last step is stored as finished.
    pub fn place(mut self, pawn: PawnId, state: PawnState) -> Self {
        self.placements.push((pawn, state));
        self
    }

    /// Build with a seeded [`GameRng`] as the dice.
    pub fn build(self, seed: u64) -> Result<TurnEngine<GameRng>, ConfigError> {
        self.build_with_dice(GameRng::new(seed))
    }

    /// Build with any dice source.
    pub fn build_with_dice<D: Dice>(self, dice: D) -> Result<TurnEngine<D>, ConfigError> {
        let state = self.build_state()?;
        Ok(TurnEngine::new(self.board, state, dice))
    }

    fn build_state(&self) -> Result<GameState, ConfigError> {
        self.board.validate()?;

        if self.seats.len() < 2 {
            return Err(ConfigError::TooFewPlayers(self.seats.len()));
        }
        if self.starting_player >= self.seats.len() {
            return Err(ConfigError::StartingPlayerOutOfRange {
                index: self.starting_player,
                player_count: self.seats.len(),
            });
        }

        let players = self.configure_players()?;
        let mut state = GameState::new(players, self.starting_player);

        for &(pawn, placed) in &self.placements {
            let placed = normalize(pawn, placed)?;
            if !state.set_pawn_state(pawn, placed) {
                return Err(ConfigError::InvalidPlacement {
                    pawn,
                    reason: "no such pawn",
                });
            }
        }
        for player in state.players() {
            check_staging(player)?;
            if player.has_finished() {
                return Err(ConfigError::AlreadyFinished(player.color()));
            }
        }

        Ok(state)
    }

    fn configure_players(&self) -> Result<Vec<Player>, ConfigError> {
        let mut players: Vec<Player> = Vec::with_capacity(self.seats.len());

        for (index, seat) in self.seats.iter().enumerate() {
            if players.iter().any(|p| p.color() == seat.color) {
                return Err(ConfigError::DuplicateColor(seat.color));
            }

            let start = match seat.start {
                Some(start) => start,
                None => {
                    self.board
                        .layout(seat.color)
                        .ok_or(ConfigError::UnknownColor(seat.color))?
                        .start
                }
            };
            let player = self
                .board
                .configure_player(PlayerId::new(index as u8), seat.color, start)?;

            if let Some(other) = players.iter().find(|p| p.start_path() == start) {
                return Err(ConfigError::DuplicateStart {
                    start,
                    first: other.color(),
                    second: seat.color,
                });
            }
            players.push(player);
        }

        Ok(players)
    }
}

/// Range-check a placement and collapse the last home step to finished.
fn normalize(pawn: PawnId, state: PawnState) -> Result<PawnState, ConfigError> {
    let reason = match state {
        PawnState::Home { slot } if usize::from(slot) >= PAWNS_PER_PLAYER => {
            "staging slot out of range"
        }
        PawnState::Path { index } if index >= PATH_LEN => "path index off the path",
        PawnState::HomeColumn { step } if step > LAST_HOME_STEP => {
            "home step past the end of the column"
        }
        PawnState::HomeColumn { step } => return Ok(PawnState::home_column(step)),
        _ => return Ok(state),
    };
    Err(ConfigError::InvalidPlacement { pawn, reason })
}

fn check_staging(player: &Player) -> Result<(), ConfigError> {
    let mut taken = FxHashSet::default();
    for pawn in player.pawns() {
        if let Some(slot) = pawn.state().staging_slot() {
            if !taken.insert(slot) {
                return Err(ConfigError::InvalidPlacement {
                    pawn: pawn.id(),
                    reason: "staging slot already taken",
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColorLayout, ScriptedDice};

    fn pawn(player: u8, index: u8) -> PawnId {
        PawnId::new(PlayerId::new(player), index)
    }

    #[test]
    fn test_build_two_players() {
        let engine = GameBuilder::new()
            .player(Color::Red)
            .player(Color::Blue)
            .build(42)
            .unwrap();

        let state = engine.state();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.players()[0].start_path(), 0);
        assert_eq!(state.players()[1].start_path(), 13);
        assert_eq!(state.players()[1].home_entrance(), 12);
    }

    #[test]
    fn test_too_few_players() {
        let result = GameBuilder::new().player(Color::Red).build(1);
        assert!(matches!(result, Err(ConfigError::TooFewPlayers(1))));
    }

    #[test]
    fn test_duplicate_color() {
        let result = GameBuilder::new().player(Color::Red).player(Color::Red).build(1);
        assert!(matches!(result, Err(ConfigError::DuplicateColor(Color::Red))));
    }

    #[test]
    fn test_duplicate_start() {
        let result = GameBuilder::new()
            .player(Color::Red)
            .player_at(Color::Blue, 0)
            .build(1);

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateStart {
                start: 0,
                first: Color::Red,
                second: Color::Blue
            })
        ));
    }

    #[test]
    fn test_unsafe_start() {
        let result = GameBuilder::new()
            .player(Color::Red)
            .player_at(Color::Blue, 20)
            .build(1);

        assert!(matches!(
            result,
            Err(ConfigError::UnsafeStart { color: Color::Blue, start: 20 })
        ));
    }

    #[test]
    fn test_custom_start_on_safe_square() {
        let board = BoardConfig::standard().with_safe_square(20);
        let engine = GameBuilder::new()
            .board(board)
            .player(Color::Red)
            .player_at(Color::Blue, 20)
            .build(1)
            .unwrap();

        assert_eq!(engine.state().players()[1].home_entrance(), 19);
    }

    #[test]
    fn test_unknown_color() {
        let mut board = BoardConfig::standard();
        board.layouts.retain(|l| l.color != Color::Green);

        let result = GameBuilder::new()
            .board(board)
            .player(Color::Red)
            .player(Color::Green)
            .build(1);

        assert!(matches!(result, Err(ConfigError::UnknownColor(Color::Green))));
    }

    #[test]
    fn test_invalid_board_is_rejected() {
        let board = BoardConfig::standard()
            .with_layout(ColorLayout::contiguous(Color::Blue, 13, 10, 204));

        let result = GameBuilder::new()
            .board(board)
            .player(Color::Red)
            .player(Color::Blue)
            .build(1);

        assert!(matches!(result, Err(ConfigError::SlotOnPath { color: Color::Blue, .. })));
    }

    #[test]
    fn test_starting_player() {
        let engine = GameBuilder::new()
            .player(Color::Red)
            .player(Color::Blue)
            .starting_player(1)
            .build(1)
            .unwrap();
        assert_eq!(engine.current_player().color(), Color::Blue);

        let result = GameBuilder::new()
            .player(Color::Red)
            .player(Color::Blue)
            .starting_player(2)
            .build(1);
        assert!(matches!(
            result,
            Err(ConfigError::StartingPlayerOutOfRange { index: 2, player_count: 2 })
        ));
    }

    #[test]
    fn test_placements() {
        let engine = GameBuilder::new()
            .player(Color::Red)
            .player(Color::Blue)
            .place(pawn(0, 0), PawnState::Path { index: 50 })
            .place(pawn(1, 3), PawnState::HomeColumn { step: 5 })
            .build_with_dice(ScriptedDice::new([1]))
            .unwrap();

        let state = engine.state();
        assert_eq!(state.pawn(pawn(0, 0)).unwrap().state(), PawnState::Path { index: 50 });
        assert_eq!(state.pawn(pawn(1, 3)).unwrap().state(), PawnState::Finished);
    }

    #[test]
    fn test_invalid_placements() {
        let build = |placed: PawnId, state: PawnState| {
            GameBuilder::new()
                .player(Color::Red)
                .player(Color::Blue)
                .place(placed, state)
                .build(1)
        };

        assert!(matches!(
            build(pawn(0, 0), PawnState::Path { index: 52 }),
            Err(ConfigError::InvalidPlacement { reason: "path index off the path", .. })
        ));
        assert!(matches!(
            build(pawn(0, 0), PawnState::HomeColumn { step: 6 }),
            Err(ConfigError::InvalidPlacement { .. })
        ));
        assert!(matches!(
            build(pawn(0, 0), PawnState::Home { slot: 4 }),
            Err(ConfigError::InvalidPlacement { .. })
        ));
        assert!(matches!(
            build(pawn(2, 0), PawnState::Finished),
            Err(ConfigError::InvalidPlacement { reason: "no such pawn", .. })
        ));
        // Pawn 0 moves into pawn 1's slot
        assert!(matches!(
            build(pawn(0, 0), PawnState::Home { slot: 1 }),
            Err(ConfigError::InvalidPlacement { reason: "staging slot already taken", .. })
        ));
    }

    #[test]
    fn test_already_finished_player_rejected() {
        let mut builder = GameBuilder::new().player(Color::Red).player(Color::Blue);
        for i in 0..4 {
            builder = builder.place(pawn(1, i), PawnState::Finished);
        }

        assert!(matches!(builder.build(1), Err(ConfigError::AlreadyFinished(Color::Blue))));
    }
}
