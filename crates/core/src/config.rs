//! Game configuration
//!
//! All values are fixed when a game is created. Changing them means building a new
//! [`GameState`](crate::GameState).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    EliminationPolicy, DEFAULT_DRAW_COLUMNS, DEFAULT_DRAW_ROWS, DEFAULT_INITIAL_POWER_UPS,
    DEFAULT_STAGING_CAPACITY, ELIMINATION_THRESHOLD, POWER_UP_SLOTS,
};

/// Initialization-time parameters of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Count of draw area columns
    pub draw_columns: usize,
    /// Initial tiles per draw area column
    pub draw_rows: usize,
    /// Count of elimination area columns the generator deals into.
    ///
    /// `None` follows `draw_columns`; see [`GameConfig::elimination_column_count`].
    pub elimination_columns: Option<usize>,
    /// Max concurrently staged tiles
    pub staging_capacity: usize,
    /// Starting power-up counter
    pub initial_power_ups: u32,
    /// Matches needed to retire one staged tile
    pub elimination_threshold: u8,
    /// Staged tiles one power-up retires at most
    pub power_up_slots: usize,
    pub policy: EliminationPolicy,
}

impl GameConfig {
    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draw_columns == 0 {
            return Err(ConfigError::ZeroDrawColumns);
        }
        if self.elimination_column_count() == 0 {
            return Err(ConfigError::ZeroEliminationColumns);
        }
        if self.staging_capacity == 0 {
            return Err(ConfigError::ZeroStagingCapacity);
        }
        if self.elimination_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.power_up_slots == 0 || self.power_up_slots > POWER_UP_SLOTS {
            return Err(ConfigError::PowerUpSlots {
                slots: self.power_up_slots,
                max: POWER_UP_SLOTS,
            });
        }
        Ok(())
    }

    /// Elimination area columns, defaulting to the draw area's column count
    pub fn elimination_column_count(&self) -> usize {
        self.elimination_columns.unwrap_or(self.draw_columns)
    }

    /// Total tiles the generator places in the draw area
    pub fn draw_tile_count(&self) -> usize {
        self.draw_columns * self.draw_rows
    }

    /// Total tiles the generator places in the elimination area
    pub fn elimination_tile_count(&self) -> usize {
        self.draw_tile_count() * self.elimination_threshold as usize
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_columns: DEFAULT_DRAW_COLUMNS,
            draw_rows: DEFAULT_DRAW_ROWS,
            elimination_columns: None,
            staging_capacity: DEFAULT_STAGING_CAPACITY,
            initial_power_ups: DEFAULT_INITIAL_POWER_UPS,
            elimination_threshold: ELIMINATION_THRESHOLD,
            power_up_slots: POWER_UP_SLOTS,
            policy: EliminationPolicy::Progressive,
        }
    }
}
