use serde::{Deserialize, Serialize};

use crate::types::{GameStatus, StagedTile, Tile};

/// Read-only copy of everything a renderer needs.
///
/// Elimination columns are listed front to active (the last tile is the one that can be
/// eliminated); draw columns are listed front first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub elimination: Vec<Vec<Tile>>,
    pub staging: Vec<Option<StagedTile>>,
    pub draw: Vec<Vec<Tile>>,
    pub status: GameStatus,
    pub power_ups: u32,
    pub episode_id: u32,
    /// Elimination area tiles removed so far this episode
    pub eliminated: u32,
    /// Per draw column: would `select_column` be accepted right now
    pub selectable: Vec<bool>,
    pub stalled: bool,
}

impl GameSnapshot {
    /// Occupied staging slots
    pub fn staged_count(&self) -> usize {
        self.staging.iter().filter(|s| s.is_some()).count()
    }
}
