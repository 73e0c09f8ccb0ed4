use thiserror::Error;

/// Invalid [`GameConfig`](crate::GameConfig)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("draw area needs at least one column")]
    ZeroDrawColumns,

    #[error("elimination area needs at least one column")]
    ZeroEliminationColumns,

    #[error("staging buffer needs at least one slot")]
    ZeroStagingCapacity,

    #[error("elimination threshold must be at least 1")]
    ZeroThreshold,

    #[error("power-up slots must be between 1 and {max}, got {slots}")]
    PowerUpSlots { slots: usize, max: usize },

    #[error("board has {actual} staging slots but the configuration asks for {expected}")]
    StagingCapacityMismatch { expected: usize, actual: usize },

    #[error("board contains duplicate tile ids")]
    DuplicateTileId,

    #[error("staged tile in slot {slot} already reached the elimination threshold")]
    StagedProgress { slot: usize },
}

/// Why an intent was not applied.
///
/// Rejections are not faults: the engine stays usable and, apart from the status
/// re-check on [`Rejection::StagingFull`], unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("game is not playing")]
    NotPlaying,

    #[error("column {column} is out of range (draw area has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("column {column} has no tiles left")]
    ColumnEmpty { column: usize },

    #[error("staging buffer is full")]
    StagingFull,

    #[error("no power-ups left")]
    NoPowerUps,

    #[error("staging buffer is empty")]
    NothingStaged,
}

impl Rejection {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            Rejection::NotPlaying => "not_playing",
            Rejection::ColumnOutOfRange { .. } => "column_out_of_range",
            Rejection::ColumnEmpty { .. } => "column_empty",
            Rejection::StagingFull => "staging_full",
            Rejection::NoPowerUps => "no_power_ups",
            Rejection::NothingStaged => "nothing_staged",
        }
    }
}
