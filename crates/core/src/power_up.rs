//! Power-up: force-retire the first staged tiles.
//!
//! Each retired tile removes at most its remaining credit of same-colored tiles from the
//! elimination area, always taking active tiles (a column is popped while its active tile
//! matches, then the next column is tried). The staged tile leaves the buffer even when
//! fewer matches were found.

use arrayvec::ArrayVec;

use crate::areas::Board;
use crate::types::{StagedTile, Tile, POWER_UP_SLOTS};

/// What a power-up activation changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerUpReport {
    /// Staged tiles that were retired, with their slot
    pub retired: Vec<(usize, StagedTile)>,
    /// Elimination area tiles that were removed
    pub removed: Vec<Tile>,
}

/// Retire up to `slots` staged tiles (capped at [`POWER_UP_SLOTS`]) in slot order
pub fn apply(board: &mut Board, slots: usize, threshold: u8) -> PowerUpReport {
    let selected: ArrayVec<usize, POWER_UP_SLOTS> = board
        .staging
        .staged()
        .map(|(slot, _)| slot)
        .take(slots.min(POWER_UP_SLOTS))
        .collect();

    let mut report = PowerUpReport::default();
    for slot in selected {
        let Some(staged) = board.staging.take(slot) else {
            continue;
        };
        let mut remaining = staged.remaining(threshold);
        let color = staged.color();

        for col in 0..board.elimination.column_count() {
            while remaining > 0 && board.elimination.active(col).map(|t| t.color) == Some(color) {
                let Some(tile) = board.elimination.pop_active(col) else {
                    break;
                };
                report.removed.push(tile);
                remaining -= 1;
            }
            if remaining == 0 {
                break;
            }
        }

        report.retired.push((slot, staged));
    }
    report
}
