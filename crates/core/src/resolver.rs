//! Elimination resolver
//!
//! Staged tiles cancel matching active tiles of the elimination area. The resolver
//! applies one elimination per step and is re-run until no step is possible. Every step
//! removes at least one elimination area tile, so the loop ends after at most as many
//! steps as that area holds tiles.
//!
//! # Policies
//!
//! - **Progressive** (default): the first staged tile (by slot) that matches any active
//!   tile removes the first matching active tile (by column) and gains one progress
//!   point. It retires when progress reaches the threshold.
//! - **Batch**: the first staged tile for which enough columns match *at once* removes
//!   all of those active tiles and retires in the same step.

use tracing::trace;

use crate::areas::Board;
use crate::types::{EliminationPolicy, EliminationStep};

/// A step the resolver is about to take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub slot: usize,
    /// Columns whose active tile will be removed, ascending
    pub columns: Vec<usize>,
}

/// Find the next elimination without mutating the board
pub fn find_step(board: &Board, policy: EliminationPolicy, threshold: u8) -> Option<Plan> {
    let area = board.elimination();
    board
        .staging()
        .staged()
        .find_map(|(slot, staged)| match policy {
            EliminationPolicy::Progressive => area
                .first_match(staged.color())
                .map(|col| Plan {
                    slot,
                    columns: vec![col],
                }),
            EliminationPolicy::Batch => {
                let needed = staged.remaining(threshold) as usize;
                let columns: Vec<usize> =
                    area.matching_columns(staged.color()).take(needed).collect();
                (needed > 0 && columns.len() == needed).then_some(Plan { slot, columns })
            }
        })
}

/// Apply a planned step. Returns one record per removed tile.
pub fn apply_step(board: &mut Board, plan: &Plan, threshold: u8) -> Vec<EliminationStep> {
    let mut steps = Vec::with_capacity(plan.columns.len());

    for &col in &plan.columns {
        let Some(staged) = board.staging.get_mut(plan.slot) else {
            break;
        };
        let color = staged.color();
        if board.elimination.active(col).map(|t| t.color) != Some(color) {
            continue;
        }
        let Some(eliminated) = board.elimination.pop_active(col) else {
            continue;
        };

        staged.progress = staged.progress.saturating_add(1);
        let progress = staged.progress;
        let staged_id = staged.tile.id;
        let retired = progress >= threshold;
        if retired {
            board.staging.take(plan.slot);
        }

        trace!(
            slot = plan.slot,
            column = col,
            color = color.as_str(),
            progress,
            retired,
            "eliminated tile"
        );

        steps.push(EliminationStep {
            slot: plan.slot,
            column: col,
            color,
            eliminated: eliminated.id,
            staged: staged_id,
            progress,
            retired,
        });
    }

    steps
}

/// Find and apply one step. `None` means the board is at its fixed point.
pub fn step(
    board: &mut Board,
    policy: EliminationPolicy,
    threshold: u8,
) -> Option<Vec<EliminationStep>> {
    let plan = find_step(board, policy, threshold)?;
    Some(apply_step(board, &plan, threshold))
}

/// Run the resolver to its fixed point, returning every removal in order
pub fn resolve(
    board: &mut Board,
    policy: EliminationPolicy,
    threshold: u8,
) -> Vec<EliminationStep> {
    let mut all = Vec::new();
    while let Some(steps) = step(board, policy, threshold) {
        all.extend(steps);
    }
    all
}
