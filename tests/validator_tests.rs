//! Level validator tests against hand-built boards and the bundled levels

use std::path::PathBuf;

use serde_json::json;

use dog_rescue::core::{validate_level, Board, LevelDescriptor, ValidationIssue};
use dog_rescue::types::{BlockIndex, Color, ObstacleId, Pos};

fn level_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels").join(name)
}

fn load_fixture(name: &str) -> Board {
    let json = std::fs::read_to_string(level_path(name)).unwrap();
    Board::from_level(&LevelDescriptor::from_json(&json).unwrap()).unwrap()
}

#[test]
fn test_enclosed_block_then_obstacle_removed() {
    // The purple O sits in a pocket closed by a U-shaped obstacle.
    let mut board = Board::from_level(
        &serde_json::from_value::<LevelDescriptor>(json!({
            "width": 7, "height": 7,
            "blocks": [{"id": "p1", "color": "purple", "required": 1, "shape": "O", "x": 1, "y": 0}],
            "dogs": [{"color": "purple", "x": 5, "y": 5}],
            "obstacles": [{"x": 0, "y": 0, "coords": [[0, 0], [0, 1], [0, 2], [1, 2], [2, 2], [3, 2], [3, 1], [3, 0]]}]
        }))
        .unwrap(),
    )
    .unwrap();

    let report = validate_level(&board);
    assert_eq!(
        report.issues,
        vec![
            ValidationIssue::UnreachableDogs {
                block_id: "p1".to_string(),
                color: Color::Purple,
            },
            ValidationIssue::DogUnreachable {
                color: Color::Purple,
                position: Pos::new(5, 5),
            },
        ]
    );

    assert!(board
        .move_obstacle(ObstacleId(0), Pos::new(4, 3))
        .is_err());
    board.move_obstacle(ObstacleId(0), Pos::new(0, 3)).unwrap();
    assert!(validate_level(&board).is_valid());
}

#[test]
fn test_validator_ignores_play_progress() {
    let mut board = load_fixture("level_01.json");
    assert!(validate_level(&board).is_valid());
    board.move_block(BlockIndex(0), Pos::new(1, 4)).unwrap();
    assert!(board.is_won());
    assert!(validate_level(&board).is_valid());
}

#[test]
fn test_bundled_levels() {
    for name in ["level_01.json", "level_03.json", "level_04.json"] {
        let report = validate_level(&load_fixture(name));
        assert!(report.is_valid(), "{name}: {:?}", report.issues);
    }
}

#[test]
fn test_level_two_needs_the_wall_moved() {
    // The blue I starts below a wall pair that leaves no 4-wide gap, and it
    // cannot stand upright in the bottom rows.
    let mut board = load_fixture("level_02.json");
    let codes: Vec<&str> = validate_level(&board)
        .issues
        .iter()
        .map(|i| i.code())
        .collect();
    assert_eq!(codes, vec!["unreachable_dogs", "dog_unreachable"]);

    board.move_obstacle(ObstacleId(0), Pos::new(5, 0)).unwrap();
    assert!(validate_level(&board).is_valid());
}
