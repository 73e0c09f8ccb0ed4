//! Tile match (workspace facade crate).
//!
//! This package exposes the `tile_match::{core,types}` public API while the implementation
//! lives in dedicated crates under `crates/`.

pub use tile_match_core as core;
pub use tile_match_types as types;
