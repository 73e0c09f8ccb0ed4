//! Wire shape of snapshots, intents and configuration

use serde_json::{json, Value};
use tile_match::core::{Board, GameConfig, GameSnapshot, GameState, TileIds};
use tile_match::types::{EliminationPolicy, Intent, TileColor};

#[test]
fn snapshot_json_shape() {
    let board = Board::from_colors(
        &[vec![TileColor::Red, TileColor::Blue]],
        &[vec![TileColor::Red], vec![TileColor::Green]],
        2,
        &mut TileIds::new(),
    );
    let config = GameConfig {
        staging_capacity: 2,
        ..GameConfig::default()
    };
    let state = GameState::with_board(config, board, 2).unwrap();

    let v: Value = serde_json::to_value(state.snapshot()).unwrap();

    assert_eq!(v["status"], "playing");
    assert_eq!(v["power_ups"], 2);
    assert_eq!(v["episode_id"], 0);
    assert_eq!(v["stalled"], false);
    assert_eq!(v["elimination"][0][0], json!({ "id": 1, "color": "red" }));
    assert_eq!(v["elimination"][0][1]["color"], "blue");
    assert_eq!(v["draw"][1][0]["color"], "green");
    assert_eq!(v["staging"], json!([null, null]));
    assert_eq!(v["selectable"], json!([true, true]));
}

#[test]
fn snapshot_round_trips_after_play() {
    let mut state = GameState::new(GameConfig::default(), 7).unwrap();
    state.select_column(0).unwrap();
    let snapshot = state.snapshot();

    let text = serde_json::to_string(&snapshot).unwrap();
    let back: GameSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snapshot);

    let v: Value = serde_json::from_str(&text).unwrap();
    let staged = &v["staging"][0];
    assert!(staged["tile"]["id"].is_u64());
    assert!(staged["progress"].as_u64().unwrap() < 3);
}

#[test]
fn intent_json_is_tagged() {
    let select = serde_json::to_value(Intent::SelectColumn { column: 3 }).unwrap();
    assert_eq!(select, json!({ "type": "select_column", "column": 3 }));

    let power: Intent = serde_json::from_str(r#"{"type":"use_power_up"}"#).unwrap();
    assert_eq!(power, Intent::UsePowerUp);

    let reset: Intent = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
    assert_eq!(reset, Intent::Reset);

    assert!(serde_json::from_str::<Intent>(r#"{"type":"hold"}"#).is_err());
}

#[test]
fn config_json_fills_defaults() {
    let config: GameConfig =
        serde_json::from_str(r#"{"draw_rows":2,"policy":"batch"}"#).unwrap();
    assert_eq!(config.draw_rows, 2);
    assert_eq!(config.policy, EliminationPolicy::Batch);
    assert_eq!(config.draw_columns, GameConfig::default().draw_columns);
    assert!(config.validate().is_ok());

    let text = serde_json::to_string(&config).unwrap();
    let back: GameConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
}
