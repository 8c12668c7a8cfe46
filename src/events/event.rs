//! Game event types.
//!
//! Events describe what the engine did, in the order it did it. Renderers
//! and loggers consume them through a [`GameObserver`](super::GameObserver).

use serde::{Deserialize, Serialize};

use crate::core::{Color, PawnId, PawnState};

/// Something that happened during a roll or selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The current player rolled the die.
    Rolled { player: Color, roll: u8 },

    /// A pawn moved.
    Moved {
        pawn: PawnId,
        from: PawnState,
        to: PawnState,
        roll: u8,
    },

    /// A pawn was captured and sent back home.
    Captured {
        pawn: PawnId,
        by: PawnId,
        square: u8,
    },

    /// The turn passed to the next player.
    TurnPassed { from: Color, to: Color },

    /// A player finished all pawns. No further events follow.
    GameOver { winner: Color },
}

impl GameEvent {
    /// Check if this event ends the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::Captured {
            pawn: PawnId::new(PlayerId::new(1), 0),
            by: PawnId::new(PlayerId::new(0), 2),
            square: 20,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
        assert!(!deserialized.is_game_over());
        assert!(GameEvent::GameOver { winner: Color::Red }.is_game_over());
    }
}
