//! Engine notifications.
//!
//! The engine reports what it does as [`GameEvent`]s to every registered
//! [`GameObserver`]. Observers are how renderers learn about captures and turn
//! changes, and how the game-over notification is delivered.

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::{EventLog, GameObserver};
