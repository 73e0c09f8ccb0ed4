//! Status evaluator - win/lose detection
//!
//! - **Won**: every area is empty.
//! - **Lost**: the staging buffer is full, no elimination step is possible and no
//!   power-ups are left.
//!
//! Evaluation only ever moves `Playing` to a terminal status; terminal statuses are
//! returned unchanged, so running it twice without a mutation in between is a no-op.

use crate::areas::Board;
use crate::resolver;
use crate::types::{EliminationPolicy, GameStatus};

/// Compute the status that follows `current` for this board
pub fn evaluate(
    board: &Board,
    power_ups: u32,
    current: GameStatus,
    policy: EliminationPolicy,
    threshold: u8,
) -> GameStatus {
    if current.is_terminal() {
        return current;
    }
    if is_won(board) {
        return GameStatus::Won;
    }
    if is_lost(board, power_ups, policy, threshold) {
        return GameStatus::Lost;
    }
    GameStatus::Playing
}

pub fn is_won(board: &Board) -> bool {
    board.is_cleared()
}

pub fn is_lost(board: &Board, power_ups: u32, policy: EliminationPolicy, threshold: u8) -> bool {
    board.staging().is_full()
        && power_ups == 0
        && resolver::find_step(board, policy, threshold).is_none()
}

/// True when the game is still `Playing` but no intent other than reset can be accepted.
///
/// This happens when the draw area offers nothing to pick (or the buffer is full), no
/// power-up can fire and the resolver is idle, yet tiles remain. The status is left alone;
/// hosts use this to offer a restart.
pub fn is_stalled(
    board: &Board,
    power_ups: u32,
    policy: EliminationPolicy,
    threshold: u8,
) -> bool {
    if board.is_cleared() {
        return false;
    }
    let can_draw = !board.staging().is_full() && !board.draw().is_empty();
    let can_power_up = power_ups > 0 && !board.staging().is_empty();
    let can_eliminate = resolver::find_step(board, policy, threshold).is_some();
    !(can_draw || can_power_up || can_eliminate)
}
