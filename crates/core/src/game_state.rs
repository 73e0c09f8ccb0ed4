//! Game state module - owns the board and applies player intents
//!
//! Every accepted intent runs to completion before returning: the intent's own mutation,
//! then the resolver until its fixed point, with the status evaluator after each change.
//! Rejected intents leave the state untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::areas::{Board, TileIds};
use crate::config::GameConfig;
use crate::error::{ConfigError, Rejection};
use crate::generator;
use crate::power_up;
use crate::resolver;
use crate::snapshot::GameSnapshot;
use crate::status;
use crate::types::{EliminationStep, GameStatus, Intent, Tile};

/// Result of an accepted intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub intent: Intent,
    /// Slot the picked tile was staged in (`SelectColumn` only)
    pub staged_slot: Option<usize>,
    /// Elimination area tiles a power-up removed directly
    pub power_up_removed: Vec<Tile>,
    /// Resolver removals, in order
    pub steps: Vec<EliminationStep>,
    pub status: GameStatus,
}

impl Outcome {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            staged_slot: None,
            power_up_removed: Vec::new(),
            steps: Vec::new(),
            status: GameStatus::Playing,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    power_ups: u32,
    rng: StdRng,
    seed: u64,
    ids: TileIds,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Elimination area tiles removed this episode, by the resolver or a power-up.
    eliminated: u32,
    /// Outcome of the last accepted intent (consumed by observers).
    last_outcome: Option<Outcome>,
}

impl GameState {
    /// Create a game with a freshly generated board
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::generated(config, seed))
    }

    /// Create a game on a prepared board.
    ///
    /// The board's staging capacity must match the configuration. Later resets generate
    /// boards from seed 0.
    pub fn with_board(
        config: GameConfig,
        board: Board,
        power_ups: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.staging().capacity() != config.staging_capacity {
            return Err(ConfigError::StagingCapacityMismatch {
                expected: config.staging_capacity,
                actual: board.staging().capacity(),
            });
        }
        if !board.tile_ids_unique() {
            return Err(ConfigError::DuplicateTileId);
        }
        if let Some((slot, _)) = board
            .staging()
            .staged()
            .find(|(_, t)| t.progress >= config.elimination_threshold)
        {
            return Err(ConfigError::StagedProgress { slot });
        }

        let ids = board.max_tile_id().map(TileIds::after).unwrap_or_default();
        let mut state = Self {
            config,
            board,
            status: GameStatus::Playing,
            power_ups,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
            ids,
            episode_id: 0,
            eliminated: 0,
            last_outcome: None,
        };
        state.refresh_status();
        Ok(state)
    }

    fn generated(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = TileIds::new();
        let board = generator::generate(&config, &mut rng, &mut ids);
        let mut state = Self {
            config,
            board,
            status: GameStatus::Playing,
            power_ups: config.initial_power_ups,
            rng,
            seed,
            ids,
            episode_id: 0,
            eliminated: 0,
            last_outcome: None,
        };
        state.refresh_status();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn power_ups(&self) -> u32 {
        self.power_ups
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Elimination area tiles removed so far this episode
    pub fn eliminated_count(&self) -> u32 {
        self.eliminated
    }

    /// Per draw column: would `select_column` be accepted right now
    pub fn selectable_columns(&self) -> Vec<bool> {
        self.selectable().collect()
    }

    fn selectable(&self) -> impl Iterator<Item = bool> + '_ {
        let open = self.status == GameStatus::Playing && !self.board.staging().is_full();
        self.board
            .draw()
            .columns()
            .iter()
            .map(move |c| open && !c.is_empty())
    }

    pub fn can_use_power_up(&self) -> bool {
        self.status == GameStatus::Playing
            && self.power_ups > 0
            && !self.board.staging().is_empty()
    }

    /// Still playing, but nothing except a reset can be accepted
    pub fn is_stalled(&self) -> bool {
        self.status == GameStatus::Playing
            && status::is_stalled(
                &self.board,
                self.power_ups,
                self.config.policy,
                self.config.elimination_threshold,
            )
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.elimination.clear();
        out.elimination
            .extend(self.board.elimination().columns().iter().cloned());
        out.staging.clear();
        out.staging.extend_from_slice(self.board.staging().slots());
        out.draw.clear();
        out.draw.extend(self.board.draw().columns().iter().cloned());
        out.status = self.status;
        out.power_ups = self.power_ups;
        out.episode_id = self.episode_id;
        out.eliminated = self.eliminated;
        out.selectable.clear();
        out.selectable.extend(self.selectable());
        out.stalled = self.is_stalled();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the outcome of the last accepted intent.
    pub fn take_last_outcome(&mut self) -> Option<Outcome> {
        self.last_outcome.take()
    }

    /// Pick the front tile of a draw column
    pub fn select_column(&mut self, column: usize) -> Result<Outcome, Rejection> {
        self.apply_intent(Intent::SelectColumn { column })
    }

    /// Spend a power-up on the first staged tiles
    pub fn use_power_up(&mut self) -> Result<Outcome, Rejection> {
        self.apply_intent(Intent::UsePowerUp)
    }

    /// Discard the board and generate the next one from the game's RNG
    pub fn reset(&mut self) {
        let board = generator::generate(&self.config, &mut self.rng, &mut self.ids);
        self.start_episode(board);
    }

    /// Reseed the RNG, then reset
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
        self.reset();
    }

    fn start_episode(&mut self, board: Board) {
        self.board = board;
        self.status = GameStatus::Playing;
        self.power_ups = self.config.initial_power_ups;
        self.eliminated = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.last_outcome = None;
        info!(
            episode = self.episode_id,
            tiles = self.board.tile_count(),
            "new board"
        );
        self.refresh_status();
    }

    /// Apply an intent
    pub fn apply_intent(&mut self, intent: Intent) -> Result<Outcome, Rejection> {
        self.run(intent, &mut |_| {})
    }

    /// Apply an intent and capture a snapshot after each visible change.
    ///
    /// The first frame shows the intent's own mutation, each following frame one resolver
    /// step. A renderer can play them back with a delay between frames.
    pub fn apply_intent_frames(
        &mut self,
        intent: Intent,
    ) -> Result<Vec<GameSnapshot>, Rejection> {
        let mut frames = Vec::new();
        self.run(intent, &mut |state| frames.push(state.snapshot()))?;
        Ok(frames)
    }

    fn run(
        &mut self,
        intent: Intent,
        on_frame: &mut dyn FnMut(&GameState),
    ) -> Result<Outcome, Rejection> {
        let mut outcome = Outcome::new(intent);

        let accepted = match intent {
            Intent::Reset => {
                self.reset();
                Ok(())
            }
            Intent::SelectColumn { column } => self.stage_from(column, &mut outcome),
            Intent::UsePowerUp => self.fire_power_up(&mut outcome),
        };
        if let Err(rejection) = accepted {
            debug!(intent = intent.as_str(), reason = rejection.code(), "intent rejected");
            return Err(rejection);
        }

        self.refresh_status();
        on_frame(self);

        if intent != Intent::Reset {
            self.settle(&mut outcome, on_frame);
        }

        outcome.status = self.status;
        debug!(
            intent = intent.as_str(),
            steps = outcome.steps.len(),
            status = self.status.as_str(),
            "intent applied"
        );
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn stage_from(&mut self, column: usize, outcome: &mut Outcome) -> Result<(), Rejection> {
        if self.status != GameStatus::Playing {
            return Err(Rejection::NotPlaying);
        }
        let columns = self.board.draw().column_count();
        if column >= columns {
            return Err(Rejection::ColumnOutOfRange { column, columns });
        }
        if self.board.draw().front(column).is_none() {
            return Err(Rejection::ColumnEmpty { column });
        }
        if self.board.staging().is_full() {
            self.refresh_status();
            return Err(Rejection::StagingFull);
        }

        let Some(tile) = self.board.draw.take_front(column) else {
            return Err(Rejection::ColumnEmpty { column });
        };
        outcome.staged_slot = self.board.staging.place(tile);
        Ok(())
    }

    fn fire_power_up(&mut self, outcome: &mut Outcome) -> Result<(), Rejection> {
        if self.status != GameStatus::Playing {
            return Err(Rejection::NotPlaying);
        }
        if self.power_ups == 0 {
            return Err(Rejection::NoPowerUps);
        }
        if self.board.staging().is_empty() {
            return Err(Rejection::NothingStaged);
        }

        let report = power_up::apply(
            &mut self.board,
            self.config.power_up_slots,
            self.config.elimination_threshold,
        );
        self.power_ups -= 1;
        self.eliminated = self
            .eliminated
            .saturating_add(report.removed.len() as u32);
        outcome.power_up_removed = report.removed;
        Ok(())
    }

    /// Run the resolver to its fixed point, re-evaluating status after every step
    fn settle(&mut self, outcome: &mut Outcome, on_frame: &mut dyn FnMut(&GameState)) {
        while self.status == GameStatus::Playing {
            let Some(steps) = resolver::step(
                &mut self.board,
                self.config.policy,
                self.config.elimination_threshold,
            ) else {
                break;
            };
            self.eliminated = self.eliminated.saturating_add(steps.len() as u32);
            outcome.steps.extend(steps);
            self.refresh_status();
            on_frame(self);
        }
    }

    fn refresh_status(&mut self) {
        let next = status::evaluate(
            &self.board,
            self.power_ups,
            self.status,
            self.config.policy,
            self.config.elimination_threshold,
        );
        if next != self.status {
            info!(
                episode = self.episode_id,
                status = next.as_str(),
                eliminated = self.eliminated,
                "game finished"
            );
            self.status = next;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::generated(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::{DrawArea, EliminationArea, StagingBuffer};
    use crate::types::StagedTile;
    use crate::types::TileColor::{self, *};

    fn config(capacity: usize) -> GameConfig {
        GameConfig {
            staging_capacity: capacity,
            ..GameConfig::default()
        }
    }

    fn game(
        elimination: &[Vec<TileColor>],
        draw: &[Vec<TileColor>],
        capacity: usize,
        power_ups: u32,
    ) -> GameState {
        let board = Board::from_colors(elimination, draw, capacity, &mut TileIds::new());
        GameState::with_board(config(capacity), board, power_ups).unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.power_ups(), 2);
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.eliminated_count(), 0);
        assert_eq!(state.board().draw().tile_count(), 20);
        assert_eq!(state.board().elimination().tile_count(), 60);
        assert!(state.board().staging().is_empty());
        assert_eq!(state.selectable_columns(), vec![true; 5]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GameState::new(config(0), 1).unwrap_err();
        assert_eq!(err, ConfigError::ZeroStagingCapacity);
    }

    #[test]
    fn test_with_board_checks_capacity() {
        let board = Board::from_colors(&[], &[], 3, &mut TileIds::new());
        let err = GameState::with_board(config(2), board, 0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::StagingCapacityMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_with_board_rejects_duplicate_ids() {
        let tile = Tile::new(crate::types::TileId(1), Red);
        let board = Board::from_parts(
            EliminationArea::new(vec![vec![tile]]),
            StagingBuffer::new(2),
            DrawArea::new(vec![vec![tile]]),
        );
        let err = GameState::with_board(config(2), board, 0).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateTileId);
    }

    #[test]
    fn test_with_board_rejects_retired_progress() {
        let mut ids = TileIds::new();
        let mut staged = StagedTile::new(ids.tile(Red));
        staged.progress = 3;
        let board = Board::from_parts(
            EliminationArea::new(vec![vec![ids.tile(Red)]]),
            StagingBuffer::from_slots(vec![None, Some(staged)]),
            DrawArea::new(vec![vec![ids.tile(Blue)]]),
        );
        let err = GameState::with_board(config(2), board, 0).unwrap_err();
        assert_eq!(err, ConfigError::StagedProgress { slot: 1 });
    }

    #[test]
    fn test_select_column_stages_lowest_slot() {
        let mut state = game(&[vec![Green]], &[vec![Red, Blue]], 3, 0);
        let outcome = state.select_column(0).unwrap();
        assert_eq!(outcome.staged_slot, Some(0));
        assert!(outcome.steps.is_empty());
        assert_eq!(state.board().staging().get(0).map(|t| t.color()), Some(Red));
        assert_eq!(state.board().draw().front(0).map(|t| t.color), Some(Blue));
    }

    #[test]
    fn test_select_column_runs_resolver() {
        let mut state = game(&[vec![Red, Red, Red, Green]], &[vec![Green]], 3, 0);
        let outcome = state.select_column(0).unwrap();
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(state.eliminated_count(), 1);
        assert_eq!(state.board().staging().get(0).map(|t| t.progress), Some(1));
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut state = game(&[vec![Green]], &[vec![Red], vec![]], 2, 0);
        let before = state.snapshot();

        assert_eq!(
            state.select_column(5),
            Err(Rejection::ColumnOutOfRange {
                column: 5,
                columns: 2
            })
        );
        assert_eq!(state.select_column(1), Err(Rejection::ColumnEmpty { column: 1 }));
        assert_eq!(state.use_power_up(), Err(Rejection::NoPowerUps));
        assert_eq!(state.snapshot(), before);
        assert!(state.take_last_outcome().is_none());
    }

    #[test]
    fn test_power_up_needs_staged_tile() {
        let mut state = game(&[vec![Green]], &[vec![Red]], 2, 1);
        assert_eq!(state.use_power_up(), Err(Rejection::NothingStaged));
        assert_eq!(state.power_ups(), 1);
    }

    #[test]
    fn test_power_up_decrements_counter() {
        let mut state = game(&[vec![Green], vec![Red]], &[vec![Blue, Red]], 2, 1);
        assert!(!state.can_use_power_up());
        state.select_column(0).unwrap();
        assert!(state.can_use_power_up());
        let outcome = state.use_power_up().unwrap();
        assert!(!state.can_use_power_up());
        assert_eq!(state.power_ups(), 0);
        assert!(outcome.power_up_removed.is_empty());
        assert!(state.board().staging().is_empty());
    }

    #[test]
    fn test_full_staging_rejects_move() {
        let mut state = game(&[vec![Green]], &[vec![Blue, Red]], 1, 1);
        state.select_column(0).unwrap();
        assert_eq!(state.status(), GameStatus::Playing);

        let before = state.snapshot();
        assert_eq!(state.select_column(0), Err(Rejection::StagingFull));
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.selectable_columns(), vec![false]);
    }

    #[test]
    fn test_terminal_state_rejects_intents() {
        let mut state = game(&[vec![Green]], &[vec![Blue, Red]], 1, 0);
        state.select_column(0).unwrap();
        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(state.select_column(0), Err(Rejection::NotPlaying));
        assert_eq!(state.use_power_up(), Err(Rejection::NotPlaying));
    }

    #[test]
    fn test_reset_increments_episode_id() {
        let mut state = GameState::new(GameConfig::default(), 9).unwrap();
        let first = state.snapshot();
        state.reset();
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.power_ups(), 2);
        assert_ne!(state.snapshot().draw, first.draw);
        assert!(state.board().tile_ids_unique());

        let outcome = state.apply_intent(Intent::Reset).unwrap();
        assert_eq!(outcome.status, GameStatus::Playing);
        assert_eq!(state.episode_id(), 2);
    }

    #[test]
    fn test_reset_ids_never_repeat() {
        let mut state = GameState::new(GameConfig::default(), 3).unwrap();
        let first_max = state.board().max_tile_id().unwrap();
        state.reset();
        let min_after = state
            .board()
            .draw()
            .columns()
            .iter()
            .flatten()
            .map(|t| t.id)
            .min()
            .unwrap();
        assert!(min_after > first_max);
    }

    #[test]
    fn test_reset_with_seed_is_reproducible() {
        let mut a = GameState::new(GameConfig::default(), 1).unwrap();
        let mut b = GameState::new(GameConfig::default(), 2).unwrap();
        a.reset_with_seed(77);
        b.reset_with_seed(77);
        assert_eq!(a.board().draw().color_counts(), b.board().draw().color_counts());
        assert_eq!(a.seed(), 77);
    }

    #[test]
    fn test_snapshot_into_reuses_buffers() {
        let mut state = game(&[vec![Green]], &[vec![Red], vec![Blue]], 1, 0);
        let mut snapshot = GameSnapshot::default();
        state.snapshot_into(&mut snapshot);
        assert_eq!(snapshot.selectable, vec![true, true]);

        state.select_column(0).unwrap();
        state.snapshot_into(&mut snapshot);
        assert_eq!(snapshot.selectable, vec![false, false]);
        assert_eq!(snapshot, state.snapshot());
    }

    #[test]
    fn test_frames_show_each_step() {
        let mut state = game(&[vec![Red, Red, Red]], &[vec![Red]], 2, 0);
        let frames = state
            .apply_intent_frames(Intent::SelectColumn { column: 0 })
            .unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].staged_count(), 1);
        assert_eq!(frames[0].elimination[0].len(), 3);
        assert_eq!(frames[1].elimination[0].len(), 2);
        assert_eq!(frames[3].status, GameStatus::Won);
        assert_eq!(frames.last().cloned(), Some(state.snapshot()));
    }

    #[test]
    fn test_take_last_outcome() {
        let mut state = game(&[vec![Green]], &[vec![Red]], 2, 0);
        state.select_column(0).unwrap();
        let outcome = state.take_last_outcome().unwrap();
        assert_eq!(outcome.intent, Intent::SelectColumn { column: 0 });
        assert!(state.take_last_outcome().is_none());
    }

    #[test]
    fn test_stalled_game_stays_playing() {
        let mut state = game(&[vec![Green]], &[vec![Red]], 3, 0);
        state.select_column(0).unwrap();
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(state.is_stalled());
        assert!(state.snapshot().stalled);
    }

    #[test]
    fn test_default_game_state() {
        let state = GameState::default();
        assert_eq!(state.seed(), 1);
        assert_eq!(state.config(), &GameConfig::default());
    }
}
