//! Board geometry.
//!
//! The board is a shared circular path of [`PATH_LEN`] squares plus, per
//! color, a private home column and a set of staging slots where pawns wait
//! before entering play. `BoardConfig` records where each color starts, which
//! board cells its home column and staging slots occupy, and which path
//! squares are safe from capture.
//!
//! Path squares are numbered `0..PATH_LEN` and occupy the board cells with the
//! same numbers; home-column and staging cells must lie outside that range
//! and never overlap each other.
//!
//! A config is read-only once a game is built from it. Configs can be loaded
//! from JSON and are validated before use.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::player::{Player, PlayerId};
use crate::error::ConfigError;

/// Number of squares on the shared circular path.
pub const PATH_LEN: u8 = 52;

/// Number of squares in each home column.
pub const HOME_COLUMN_LEN: u8 = 6;

/// Home step of a finished pawn.
pub const LAST_HOME_STEP: u8 = HOME_COLUMN_LEN - 1;

/// Pawns owned by every player.
pub const PAWNS_PER_PLAYER: usize = 4;

/// Highest die face. Rolling it lets a pawn leave home and grants another roll.
pub const DIE_FACES: u8 = 6;

/// The path square just before a player's home column.
#[must_use]
pub const fn home_entrance(start: u8) -> u8 {
    (start + PATH_LEN - 1) % PATH_LEN
}

/// A cell on the rendered board.
///
/// Cells are opaque to the engine; renderers decide how to draw them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardCell(pub u16);

impl std::fmt::Display for BoardCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Geometry registered for one color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLayout {
    pub color: Color,

    /// Default start square on the shared path.
    pub start: u8,

    /// Cells for home steps `0..HOME_COLUMN_LEN`, in order.
    pub home_cells: [BoardCell; HOME_COLUMN_LEN as usize],

    /// Cells where pawns in home wait, in slot order.
    pub staging_slots: [BoardCell; PAWNS_PER_PLAYER],
}

impl ColorLayout {
    /// Lay out a color with consecutive home cells and staging cells.
    #[must_use]
    pub fn contiguous(
        color: Color,
        start: u8,
        first_home_cell: u16,
        first_staging_cell: u16,
    ) -> Self {
        Self {
            color,
            start,
            home_cells: std::array::from_fn(|i| BoardCell(first_home_cell + i as u16)),
            staging_slots: std::array::from_fn(|i| BoardCell(first_staging_cell + i as u16)),
        }
    }

    fn cells(&self) -> impl Iterator<Item = BoardCell> + '_ {
        self.home_cells.iter().chain(self.staging_slots.iter()).copied()
    }
}

/// Board configuration: per-color layouts and safe squares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Registered colors. A color without a layout cannot be seated.
    pub layouts: Vec<ColorLayout>,

    /// Path squares on which pawns cannot be captured.
    pub safe_squares: FxHashSet<u8>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardConfig {
    /// The classic four-color board.
    ///
    /// Starts are spaced a quarter of the path apart and are the only safe
    /// squares.
    #[must_use]
    pub fn standard() -> Self {
        let layouts = vec![
            ColorLayout::contiguous(Color::Red, 0, 52, 200),
            ColorLayout::contiguous(Color::Blue, 13, 58, 204),
            ColorLayout::contiguous(Color::Green, 26, 64, 208),
            ColorLayout::contiguous(Color::Yellow, 39, 70, 212),
        ];
        let safe_squares = layouts.iter().map(|l| l.start).collect();

        Self {
            layouts,
            safe_squares,
        }
    }

    /// Register or replace the layout for a color.
    #[must_use]
    pub fn with_layout(mut self, layout: ColorLayout) -> Self {
        self.layouts.retain(|l| l.color != layout.color);
        self.layouts.push(layout);
        self
    }

    /// Mark an additional path square as safe.
    #[must_use]
    pub fn with_safe_square(mut self, square: u8) -> Self {
        self.safe_squares.insert(square);
        self
    }

    /// Replace the set of safe squares.
    #[must_use]
    pub fn with_safe_squares(mut self, squares: impl IntoIterator<Item = u8>) -> Self {
        self.safe_squares = squares.into_iter().collect();
        self
    }

    /// Get the layout registered for a color.
    #[must_use]
    pub fn layout(&self, color: Color) -> Option<&ColorLayout> {
        self.layouts.iter().find(|l| l.color == color)
    }

    /// Check whether a path square is safe from capture.
    #[must_use]
    pub fn is_safe(&self, square: u8) -> bool {
        self.safe_squares.contains(&square)
    }

    /// Check the board for structural problems.
    ///
    /// Seat-specific checks (unsafe or shared starts) happen when players are
    /// configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(square) = self.safe_squares.iter().copied().filter(|&s| s >= PATH_LEN).min() {
            return Err(ConfigError::SafeSquareOutOfRange(square));
        }

        let mut colors = FxHashSet::default();
        let mut cells = FxHashSet::default();
        for layout in &self.layouts {
            if !colors.insert(layout.color) {
                return Err(ConfigError::DuplicateLayout(layout.color));
            }
            if layout.start >= PATH_LEN {
                return Err(ConfigError::StartOutOfRange {
                    color: layout.color,
                    start: layout.start,
                });
            }
            for cell in layout.cells() {
                if cell.0 < u16::from(PATH_LEN) {
                    return Err(ConfigError::SlotOnPath {
                        color: layout.color,
                        cell,
                    });
                }
                if !cells.insert(cell) {
                    return Err(ConfigError::OverlappingSlots { cell });
                }
            }
        }

        Ok(())
    }

    /// Resolve the geometry for a seated color.
    ///
    /// Fails if the color has no layout, or if `start` is off the path or not
    /// a safe square.
    pub fn configure_player(
        &self,
        id: PlayerId,
        color: Color,
        start: u8,
    ) -> Result<Player, ConfigError> {
        let layout = self.layout(color).ok_or(ConfigError::UnknownColor(color))?;

        if start >= PATH_LEN {
            return Err(ConfigError::StartOutOfRange { color, start });
        }
        if !self.is_safe(start) {
            return Err(ConfigError::UnsafeStart { color, start });
        }

        Ok(Player::new(id, color, start, layout.home_cells, layout.staging_slots))
    }

    /// Parse and validate a config from JSON.
    ///
    /// Missing fields fall back to the standard board.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
