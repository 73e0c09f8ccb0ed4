//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and board generation.
//! It has **no dependencies** on rendering, input handling, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Can run behind a terminal, a GUI, a web view, or headless
//! - **Synchronous**: Intents run to completion; pacing is left to the renderer
//!
//! # Module Structure
//!
//! - [`areas`]: The elimination area, staging buffer, draw area and the [`Board`] owning them
//! - [`generator`]: Random board generation with matched color supply
//! - [`resolver`]: Fixed-point elimination of staged tiles against active tiles
//! - [`power_up`]: Force-retiring staged tiles
//! - [`status`]: Win/lose detection
//! - [`game_state`]: The engine: intents, reset, snapshots
//! - [`snapshot`]: Owned, serialisable view for renderers
//!
//! # Game Rules
//!
//! - **Draw**: picking a draw column moves its front tile into the lowest empty staging
//!   slot. A full staging buffer rejects the pick.
//! - **Eliminate**: a staged tile cancels an active elimination tile of its color; after
//!   three matches its slot is recycled.
//! - **Power-up**: retires up to three staged tiles, each taking its outstanding matches
//!   from the elimination area.
//! - **Win**: all three areas empty. **Lose**: staging full, nothing matches, no power-ups.
//!
//! # Example
//!
//! ```
//! use tile_match_core::{GameConfig, GameState};
//! use tile_match_core::types::GameStatus;
//!
//! let mut game = GameState::new(GameConfig::default(), 12345).unwrap();
//!
//! // Pick the first tile of column 0
//! let outcome = game.select_column(0).unwrap();
//! assert_eq!(outcome.staged_slot, Some(0));
//!
//! // Out-of-range columns are rejected without touching the board
//! assert!(game.select_column(99).is_err());
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.status, GameStatus::Playing);
//! assert_eq!(snapshot.draw[0].len(), 3);
//! ```

pub mod areas;
pub mod config;
pub mod error;
pub mod game_state;
pub mod generator;
pub mod power_up;
pub mod resolver;
pub mod snapshot;
pub mod status;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use areas::{Board, DrawArea, EliminationArea, StagingBuffer, TileIds};
pub use config::GameConfig;
pub use error::{ConfigError, Rejection};
pub use game_state::{GameState, Outcome};
pub use power_up::PowerUpReport;
pub use snapshot::GameSnapshot;
