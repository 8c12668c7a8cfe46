//! Dice sources.
//!
//! The engine draws every roll through the [`Dice`] trait so the source can
//! be swapped: [`GameRng`] for real games, [`ScriptedDice`] for tests and
//! replays.

use super::config::DIE_FACES;
use super::rng::GameRng;

/// A source of die rolls in `1..=DIE_FACES`.
pub trait Dice {
    /// Draw the next roll.
    fn roll(&mut self) -> u8;
}

impl Dice for GameRng {
    fn roll(&mut self) -> u8 {
        self.roll_die()
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

/// Replays a fixed sequence of rolls, starting over when it runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create dice that yield `rolls` in order, cycling.
    ///
    /// # Panics
    ///
    /// If `rolls` is empty or holds a value outside `1..=DIE_FACES`.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        let rolls: Vec<u8> = rolls.into_iter().collect();
        assert!(!rolls.is_empty(), "Must script at least one roll");
        assert!(
            rolls.iter().all(|r| (1..=DIE_FACES).contains(r)),
            "Scripted rolls must be between 1 and {DIE_FACES}"
        );

        Self { rolls, cursor: 0 }
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
