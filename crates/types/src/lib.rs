//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and formatting, making them
//! usable in any context (engine logic, a renderer, a remote controller).
//!
//! # Play Areas
//!
//! | Area | Name | Active end | Capacity |
//! |------|------|------------|----------|
//! | A | Elimination area | last tile of each column | fixed at generation |
//! | B | Staging buffer | every occupied slot | `DEFAULT_STAGING_CAPACITY` slots |
//! | C | Draw area | first tile of each column | fixed at generation |
//!
//! # Reference Configuration
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DRAW_COLUMNS` | 5 | Columns in the draw area (and the elimination area) |
//! | `DEFAULT_DRAW_ROWS` | 4 | Initial tiles per draw column |
//! | `DEFAULT_STAGING_CAPACITY` | 7 | Slots in the staging buffer |
//! | `DEFAULT_INITIAL_POWER_UPS` | 2 | Power-ups available at the start of a game |
//! | `ELIMINATION_THRESHOLD` | 3 | Matches a staged tile needs before it retires |
//! | `POWER_UP_SLOTS` | 3 | Staged tiles one power-up retires at most |
//! | `ELIMINATION_STEP_DELAY_MS` | 100 | Suggested pause between elimination frames |
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{GameStatus, Intent, TileColor, ELIMINATION_THRESHOLD};
//!
//! // Parse a color (case-insensitive)
//! let color = TileColor::from_str("Red").unwrap();
//! assert_eq!(color, TileColor::Red);
//! assert_eq!(color.as_str(), "red");
//!
//! // Every palette entry has a stable index
//! assert_eq!(TileColor::ALL[TileColor::Purple.index()], TileColor::Purple);
//!
//! // Intents carry their arguments
//! let intent = Intent::SelectColumn { column: 2 };
//! assert_eq!(intent.as_str(), "selectColumn");
//!
//! assert!(!GameStatus::Playing.is_terminal());
//! assert_eq!(ELIMINATION_THRESHOLD, 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Draw area columns in the reference configuration
pub const DEFAULT_DRAW_COLUMNS: usize = 5;

/// Initial rows per draw area column in the reference configuration
pub const DEFAULT_DRAW_ROWS: usize = 4;

/// Staging buffer slots in the reference configuration
pub const DEFAULT_STAGING_CAPACITY: usize = 7;

/// Power-ups granted at the start of a game
pub const DEFAULT_INITIAL_POWER_UPS: u32 = 2;

/// Matches a staged tile must accumulate before its slot is recycled.
///
/// Also the multiplier between draw area and elimination area color counts.
pub const ELIMINATION_THRESHOLD: u8 = 3;

/// Upper bound on staged tiles retired by a single power-up
pub const POWER_UP_SLOTS: usize = 3;

/// Suggested delay between two elimination frames when a renderer animates them.
///
/// The engine never waits; this is only a hint for presentation layers.
pub const ELIMINATION_STEP_DELAY_MS: u32 = 100;


/// The five tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl TileColor {
    /// Full palette in index order
    pub const ALL: [TileColor; 5] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Purple,
    ];

    /// Number of palette entries
    pub const COUNT: usize = 5;

    /// Position of this color in [`TileColor::ALL`]
    pub fn index(self) -> usize {
        match self {
            TileColor::Red => 0,
            TileColor::Blue => 1,
            TileColor::Green => 2,
            TileColor::Yellow => 3,
            TileColor::Purple => 4,
        }
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_match_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("green"), Some(TileColor::Green));
    /// assert_eq!(TileColor::from_str("YELLOW"), Some(TileColor::Yellow));
    /// assert_eq!(TileColor::from_str("cyan"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileColor::Red),
            "blue" => Some(TileColor::Blue),
            "green" => Some(TileColor::Green),
            "yellow" => Some(TileColor::Yellow),
            "purple" => Some(TileColor::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Yellow => "yellow",
            TileColor::Purple => "purple",
        }
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque tile identity, unique within one game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A colored unit of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub color: TileColor,
}

impl Tile {
    pub fn new(id: TileId, color: TileColor) -> Self {
        Self { id, color }
    }
}

/// A tile sitting in the staging buffer.
///
/// `progress` counts elimination area tiles this tile has already cancelled and stays
/// below the elimination threshold; reaching the threshold empties the slot instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagedTile {
    pub tile: Tile,
    pub progress: u8,
}

impl StagedTile {
    pub fn new(tile: Tile) -> Self {
        Self { tile, progress: 0 }
    }

    pub fn color(&self) -> TileColor {
        self.tile.color
    }

    /// Matches still owed before the tile retires
    pub fn remaining(&self, threshold: u8) -> u8 {
        threshold.saturating_sub(self.progress)
    }
}

/// Game status
///
/// `Won` and `Lost` are terminal: only a reset leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// How the resolver retires staged tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationPolicy {
    /// One match per step; staged tiles accumulate progress until the threshold.
    #[default]
    Progressive,
    /// A staged tile retires in one step, and only when enough columns match at once.
    Batch,
}

/// Player intents accepted by the engine
///
/// These are issued by whatever drives the game: a renderer's input layer, a script,
/// or a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Pick the front tile of a draw area column
    SelectColumn { column: usize },
    /// Spend one power-up on the first staged tiles
    UsePowerUp,
    /// Discard the board and generate a new one
    Reset,
}

impl Intent {
    /// Parse an argument-less intent from its camelCase name.
    ///
    /// `selectColumn` needs a column index and is therefore not parseable here.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "usepowerup" => Some(Intent::UsePowerUp),
            "reset" => Some(Intent::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SelectColumn { .. } => "selectColumn",
            Intent::UsePowerUp => "usePowerUp",
            Intent::Reset => "reset",
        }
    }
}

/// One elimination area tile removed by the resolver.
///
/// Emitted in the order the removals happened so a renderer can replay them
/// at its own cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EliminationStep {
    /// Staging slot whose tile made the match
    pub slot: usize,
    /// Elimination area column the tile was taken from
    pub column: usize,
    pub color: TileColor,
    /// The elimination area tile that was removed
    pub eliminated: TileId,
    /// The staged tile that matched
    pub staged: TileId,
    /// Progress of the staged tile after this step
    pub progress: u8,
    /// True when this step emptied the staging slot
    pub retired: bool,
}
