//! Areas module - the three play areas and the board that owns them
//!
//! - [`EliminationArea`] (area A): columns whose *last* tile is active.
//! - [`StagingBuffer`] (area B): fixed-capacity slots, each empty or holding a staged tile.
//! - [`DrawArea`] (area C): columns whose *first* tile is the one a player may pick.
//!
//! Sequence order encodes position; removing an active tile implicitly exposes the next
//! one. Column counts never change after construction, only column lengths shrink.

use std::collections::HashSet;

use crate::types::{StagedTile, Tile, TileColor, TileId};

/// Per-color tile tally indexed by [`TileColor::index`]
pub type ColorCounts = [usize; TileColor::COUNT];

/// Monotonic tile id allocator.
///
/// One allocator lives for the whole game instance so ids never repeat, even across
/// resets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continue allocating after `last`
    pub fn after(last: TileId) -> Self {
        Self {
            next: last.0.saturating_add(1),
        }
    }

    /// Allocate a fresh tile of the given color
    pub fn tile(&mut self, color: TileColor) -> Tile {
        let id = TileId(self.next);
        self.next += 1;
        Tile::new(id, color)
    }
}

impl Default for TileIds {
    fn default() -> Self {
        Self::new()
    }
}

fn tally<'a>(tiles: impl Iterator<Item = &'a Tile>) -> ColorCounts {
    let mut counts = [0usize; TileColor::COUNT];
    for tile in tiles {
        counts[tile.color.index()] += 1;
    }
    counts
}

/// Area A: tiles waiting to be eliminated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EliminationArea {
    columns: Vec<Vec<Tile>>,
}

impl EliminationArea {
    pub fn new(columns: Vec<Vec<Tile>>) -> Self {
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vec<Tile>] {
        &self.columns
    }

    pub fn column(&self, col: usize) -> Option<&[Tile]> {
        self.columns.get(col).map(Vec::as_slice)
    }

    /// Active (end) tile of a column
    pub fn active(&self, col: usize) -> Option<&Tile> {
        self.columns.get(col).and_then(|c| c.last())
    }

    /// Active tiles of every non-empty column, in column order
    pub fn actives(&self) -> impl Iterator<Item = (usize, &Tile)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(col, c)| c.last().map(|t| (col, t)))
    }

    /// First column (by index) whose active tile has `color`
    pub fn first_match(&self, color: TileColor) -> Option<usize> {
        self.actives()
            .find(|(_, t)| t.color == color)
            .map(|(col, _)| col)
    }

    /// Every column whose active tile has `color`, ascending
    pub fn matching_columns(&self, color: TileColor) -> impl Iterator<Item = usize> + '_ {
        self.actives()
            .filter(move |(_, t)| t.color == color)
            .map(|(col, _)| col)
    }

    pub fn tile_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    pub fn color_counts(&self) -> ColorCounts {
        tally(self.columns.iter().flatten())
    }

    pub(crate) fn pop_active(&mut self, col: usize) -> Option<Tile> {
        self.columns.get_mut(col).and_then(Vec::pop)
    }
}

/// Area B: fixed-capacity staging slots
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagingBuffer {
    slots: Vec<Option<StagedTile>>,
}

impl StagingBuffer {
    /// Create an all-empty buffer
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Create a buffer with pre-filled slots; capacity is `slots.len()`
    pub fn from_slots(slots: Vec<Option<StagedTile>>) -> Self {
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<StagedTile>] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&StagedTile> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots with their index, ascending
    pub fn staged(&self) -> impl Iterator<Item = (usize, &StagedTile)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|t| (i, t)))
    }

    /// Count of non-empty slots
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Lowest-index empty slot
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Sum of elimination progress across staged tiles
    pub fn progress_total(&self) -> usize {
        self.staged().map(|(_, t)| t.progress as usize).sum()
    }

    pub fn color_counts(&self) -> ColorCounts {
        tally(self.staged().map(|(_, t)| &t.tile))
    }

    /// Stage a tile in the first empty slot. Returns the slot, or `None` when full.
    pub(crate) fn place(&mut self, tile: Tile) -> Option<usize> {
        let slot = self.first_empty()?;
        self.slots[slot] = Some(StagedTile::new(tile));
        Some(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut StagedTile> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Empty a slot, returning what it held
    pub(crate) fn take(&mut self, slot: usize) -> Option<StagedTile> {
        self.slots.get_mut(slot).and_then(Option::take)
    }
}

/// Area C: columns the player draws from, front first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawArea {
    columns: Vec<Vec<Tile>>,
}

impl DrawArea {
    pub fn new(columns: Vec<Vec<Tile>>) -> Self {
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vec<Tile>] {
        &self.columns
    }

    pub fn column(&self, col: usize) -> Option<&[Tile]> {
        self.columns.get(col).map(Vec::as_slice)
    }

    /// Front tile of a column, the only one a player may pick
    pub fn front(&self, col: usize) -> Option<&Tile> {
        self.columns.get(col).and_then(|c| c.first())
    }

    pub fn tile_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    pub fn color_counts(&self) -> ColorCounts {
        tally(self.columns.iter().flatten())
    }

    /// Remove the front tile; later tiles shift forward
    pub(crate) fn take_front(&mut self, col: usize) -> Option<Tile> {
        let column = self.columns.get_mut(col)?;
        if column.is_empty() {
            return None;
        }
        Some(column.remove(0))
    }
}

/// The three play areas of one game
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pub(crate) elimination: EliminationArea,
    pub(crate) staging: StagingBuffer,
    pub(crate) draw: DrawArea,
}

impl Board {
    pub fn from_parts(elimination: EliminationArea, staging: StagingBuffer, draw: DrawArea) -> Self {
        Self {
            elimination,
            staging,
            draw,
        }
    }

    /// Build a board from plain color columns with an empty staging buffer.
    ///
    /// Elimination columns are listed front to active (the last entry is active); draw
    /// columns are listed front first.
    pub fn from_colors(
        elimination: &[Vec<TileColor>],
        draw: &[Vec<TileColor>],
        staging_capacity: usize,
        ids: &mut TileIds,
    ) -> Self {
        let mut build = |columns: &[Vec<TileColor>]| -> Vec<Vec<Tile>> {
            columns
                .iter()
                .map(|c| c.iter().map(|&color| ids.tile(color)).collect())
                .collect()
        };
        let elimination = EliminationArea::new(build(elimination));
        let draw = DrawArea::new(build(draw));
        Self::from_parts(elimination, StagingBuffer::new(staging_capacity), draw)
    }

    pub fn elimination(&self) -> &EliminationArea {
        &self.elimination
    }

    pub fn staging(&self) -> &StagingBuffer {
        &self.staging
    }

    pub fn draw(&self) -> &DrawArea {
        &self.draw
    }

    /// Tiles across all three areas
    pub fn tile_count(&self) -> usize {
        self.elimination.tile_count() + self.staging.occupied() + self.draw.tile_count()
    }

    /// True when every area is empty
    pub fn is_cleared(&self) -> bool {
        self.elimination.is_empty() && self.staging.is_empty() && self.draw.is_empty()
    }

    fn all_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.elimination
            .columns
            .iter()
            .flatten()
            .chain(self.staging.staged().map(|(_, t)| &t.tile))
            .chain(self.draw.columns.iter().flatten())
    }

    /// Check that no tile id appears twice across the areas
    pub fn tile_ids_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.all_tiles().all(|t| seen.insert(t.id))
    }

    /// Largest tile id on the board, if any
    pub fn max_tile_id(&self) -> Option<TileId> {
        self.all_tiles().map(|t| t.id).max()
    }
}
