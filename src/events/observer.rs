//! Observer seam for collaborators that react to the game.

use std::cell::RefCell;
use std::rc::Rc;

use super::event::GameEvent;
use crate::core::Color;

/// Receives engine notifications.
///
/// Both methods default to doing nothing, so an observer only implements what
/// it needs. `on_game_over` fires exactly once per game, after the
/// corresponding [`GameEvent::GameOver`] has been passed to `on_event`.
pub trait GameObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called once when a player wins.
    fn on_game_over(&mut self, _winner: Color) {}
}

/// Shared, cloneable event recorder.
///
/// Register a clone with the engine and keep another to read the log.
///
/// ```
/// use ludo_engine::events::{EventLog, GameEvent, GameObserver};
/// use ludo_engine::core::Color;
///
/// let log = EventLog::new();
/// let mut observer = log.clone();
/// observer.on_event(&GameEvent::Rolled { player: Color::Red, roll: 4 });
///
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
    winners: Rc<RefCell<Vec<Color>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Winners reported through `on_game_over`.
    #[must_use]
    pub fn winners(&self) -> Vec<Color> {
        self.winners.borrow().clone()
    }

    /// Count events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }

    fn on_game_over(&mut self, winner: Color) {
        self.winners.borrow_mut().push(winner);
    }
}
