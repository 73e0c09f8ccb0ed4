//! Board generator
//!
//! The draw area is filled with uniformly random colors; the elimination area then gets
//! exactly `threshold` tiles of each color per draw tile of that color, shuffled and dealt
//! round-robin. Supply and demand of every color therefore match, which makes every
//! generated board solvable in principle.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::areas::{Board, DrawArea, EliminationArea, StagingBuffer, TileIds};
use crate::config::GameConfig;
use crate::types::{Tile, TileColor};

/// Generate a fresh board for `config`
pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R, ids: &mut TileIds) -> Board {
    let draw = fill_draw_area(config, rng, ids);
    let elimination = fill_elimination_area(config, &draw, rng, ids);
    Board::from_parts(
        elimination,
        StagingBuffer::new(config.staging_capacity),
        draw,
    )
}

fn fill_draw_area<R: Rng>(config: &GameConfig, rng: &mut R, ids: &mut TileIds) -> DrawArea {
    let columns = (0..config.draw_columns)
        .map(|_| {
            (0..config.draw_rows)
                .map(|_| {
                    let color = TileColor::ALL[rng.gen_range(0..TileColor::COUNT)];
                    ids.tile(color)
                })
                .collect()
        })
        .collect();
    DrawArea::new(columns)
}

fn fill_elimination_area<R: Rng>(
    config: &GameConfig,
    draw: &DrawArea,
    rng: &mut R,
    ids: &mut TileIds,
) -> EliminationArea {
    let counts = draw.color_counts();
    let multiplier = config.elimination_threshold as usize;

    let mut tiles: Vec<Tile> = Vec::with_capacity(draw.tile_count() * multiplier);
    for color in TileColor::ALL {
        for _ in 0..counts[color.index()] * multiplier {
            tiles.push(ids.tile(color));
        }
    }
    tiles.shuffle(rng);

    EliminationArea::new(deal(tiles, config.elimination_column_count()))
}

/// Deal tiles round-robin: row 0 across all columns, then row 1, and so on.
///
/// Column lengths differ by at most one and never increase with the column index.
fn deal(tiles: Vec<Tile>, columns: usize) -> Vec<Vec<Tile>> {
    let per_column = tiles.len().div_ceil(columns.max(1));
    let mut out: Vec<Vec<Tile>> = (0..columns)
        .map(|_| Vec::with_capacity(per_column))
        .collect();
    if columns == 0 {
        return out;
    }
    for (i, tile) in tiles.into_iter().enumerate() {
        out[i % columns].push(tile);
    }
    out
}
