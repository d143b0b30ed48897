//! Board tests - movement legality, rescue order, and snapshot laws

use std::collections::HashSet;

use serde_json::json;

use dog_rescue::core::{Board, LevelDescriptor, MoveError};
use dog_rescue::types::{BlockIndex, DogIndex, ObstacleId, Pos};

fn board(level: serde_json::Value) -> Board {
    let level: LevelDescriptor = serde_json::from_value(level).unwrap();
    Board::from_level(&level).unwrap()
}

fn single_red_i() -> Board {
    board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 1, "y": 1}],
        "dogs": [{"color": "red", "x": 4, "y": 4}]
    }))
}

/// Small deterministic generator so property loops need no extra crates
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: i32) -> i32 {
        (self.next() % n as u64) as i32
    }
}

fn assert_no_overlaps(board: &Board) {
    let mut block_cells = HashSet::new();
    for (_, block) in board.active_blocks() {
        for cell in block.occupied_cells() {
            assert!(block_cells.insert(cell), "blocks overlap at {cell}");
        }
    }
    let mut obstacle_cells = HashSet::new();
    for obstacle in board.obstacles() {
        for cell in obstacle.occupied_cells() {
            assert!(obstacle_cells.insert(cell), "obstacles overlap at {cell}");
            assert!(!block_cells.contains(&cell), "obstacle covers block at {cell}");
        }
    }
}

#[test]
fn test_move_then_rescue_scenario() {
    let mut board = single_red_i();
    let red = BlockIndex(0);

    assert!(board.can_block_move_to(red, Pos::new(1, 3)));
    let outcome = board.move_block(red, Pos::new(1, 3)).unwrap();
    assert!(outcome.rescued_dogs.is_empty());
    let cells: Vec<Pos> = board.blocks()[0].occupied_cells().collect();
    assert_eq!(
        cells,
        vec![Pos::new(1, 3), Pos::new(2, 3), Pos::new(3, 3), Pos::new(4, 3)]
    );
    assert!(!board.is_won());

    let outcome = board.move_block(red, Pos::new(1, 4)).unwrap();
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(0)]);
    assert!(outcome.block_disappeared);
    assert!(board.is_won());

    // A complete block is gone from the board.
    assert!(board.block_at(Pos::new(1, 4)).is_none());
    assert!(matches!(
        board.move_block(red, Pos::new(0, 0)),
        Err(MoveError::BlockComplete(_))
    ));
}

#[test]
fn test_obstacle_never_enters_dog_cell() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [],
        "dogs": [{"color": "red", "x": 0, "y": 0}],
        "walls": [{"x": 3, "y": 3}]
    }));
    let wall = ObstacleId(0);
    assert_eq!(
        board.check_obstacle_move(wall, Pos::new(0, 0)),
        Err(MoveError::DogBlocked(Pos::new(0, 0)))
    );
    assert!(board.can_obstacle_move_to(wall, Pos::new(1, 0)));
    board.move_obstacle(wall, Pos::new(1, 0)).unwrap();
    assert!(board.is_wall(Pos::new(1, 0)));
    assert!(!board.is_wall(Pos::new(3, 3)));
}

#[test]
fn test_obstacle_blocked_by_block_and_obstacle() {
    let board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "O", "x": 0, "y": 0}],
        "dogs": [],
        "walls": [{"x": 5, "y": 5}, {"x": 3, "y": 3}]
    }));
    assert!(matches!(
        board.check_obstacle_move(ObstacleId(0), Pos::new(1, 1)),
        Err(MoveError::BlockCollision { .. })
    ));
    assert!(matches!(
        board.check_obstacle_move(ObstacleId(0), Pos::new(5, 5)),
        Err(MoveError::ObstacleCollision { .. })
    ));
    assert_eq!(
        board.check_obstacle_move(ObstacleId(9), Pos::new(0, 0)),
        Err(MoveError::UnknownObstacle(ObstacleId(9)))
    );
}

#[test]
fn test_two_dogs_one_move_when_required_two() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 2, "shape": "I", "x": 0, "y": 0}],
        "dogs": [{"color": "red", "x": 2, "y": 3}, {"color": "red", "x": 4, "y": 3}]
    }));
    let outcome = board.move_block(BlockIndex(0), Pos::new(1, 3)).unwrap();
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(0), DogIndex(1)]);
    assert!(outcome.block_disappeared);
    assert!(board.is_won());
}

#[test]
fn test_first_match_wins_when_required_one() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 0, "y": 0}],
        "dogs": [{"color": "red", "x": 4, "y": 3}, {"color": "red", "x": 2, "y": 3}]
    }));
    let outcome = board.move_block(BlockIndex(0), Pos::new(1, 3)).unwrap();
    // Shape order visits (2, 3) before (4, 3).
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(1)]);
    assert!(outcome.block_disappeared);
    assert_eq!(board.dogs_remaining(), 1);
    assert!(!board.dog(DogIndex(0)).unwrap().is_rescued());
}

#[test]
fn test_rotation_rescues_and_respects_dogs() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [
            {"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 1, "y": 1},
            {"id": "b1", "color": "blue", "required": 1, "shape": "I2", "x": 4, "y": 4}
        ],
        "dogs": [{"color": "red", "x": 1, "y": 3}, {"color": "blue", "x": 0, "y": 0}]
    }));
    let outcome = board.rotate_block(BlockIndex(0)).unwrap();
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(0)]);
    assert!(outcome.block_disappeared);

    // The blue I2 turns vertical within the last two rows.
    assert!(board.can_block_rotate(BlockIndex(1)));
}

#[test]
fn test_rotation_rescue_stops_at_first_match() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 1, "y": 1}],
        "dogs": [{"color": "red", "x": 1, "y": 4}, {"color": "red", "x": 1, "y": 2}]
    }));
    let outcome = board.rotate_block(BlockIndex(0)).unwrap();
    // The vertical I visits (1, 2) before (1, 4).
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(1)]);
    assert!(outcome.block_disappeared);
    assert!(!board.dog(DogIndex(0)).unwrap().is_rescued());
    assert!(!board.is_won());
}

#[test]
fn test_extreme_coordinates_are_rejected() {
    let mut board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "I", "x": 1, "y": 1}],
        "dogs": [{"color": "red", "x": 4, "y": 4}],
        "walls": [{"x": 3, "y": 3}]
    }));
    let red = BlockIndex(0);
    let wall = ObstacleId(0);
    let start = board.snapshot();

    for pos in [
        Pos::new(i32::MAX, 0),
        Pos::new(0, i32::MAX),
        Pos::new(i32::MIN, i32::MIN),
        Pos::new(i32::MAX, i32::MIN),
    ] {
        assert!(!board.can_block_move_to(red, pos), "block at {pos}");
        assert!(!board.can_obstacle_move_to(wall, pos), "obstacle at {pos}");
    }
    assert!(matches!(
        board.move_block(red, Pos::new(i32::MAX, 0)),
        Err(MoveError::OutOfBounds(_))
    ));
    assert!(matches!(
        board.move_obstacle(wall, Pos::new(i32::MIN, i32::MAX)),
        Err(MoveError::OutOfBounds(_))
    ));
    assert_eq!(board.snapshot(), start);
}

#[test]
fn test_not_rotatable_block() {
    let board = board(json!({
        "width": 6, "height": 6,
        "blocks": [{"id": "r1", "color": "red", "required": 1, "shape": "T", "x": 1, "y": 1, "rotatable": false}],
        "dogs": []
    }));
    assert_eq!(
        board.check_block_rotate(BlockIndex(0)),
        Err(MoveError::NotRotatable("r1".to_string()))
    );
    assert_eq!(board.blocks()[0].shape().variant_count(), 1);
}

#[test]
fn test_snapshot_round_trip_on_fresh_board() {
    let level = json!({
        "width": 8, "height": 8,
        "blocks": [
            {"id": "g1", "color": "green", "required": 2, "shape": "T", "x": 1, "y": 1},
            {"id": "r1", "color": "red", "required": 1, "shape": "J", "x": 5, "y": 1}
        ],
        "dogs": [
            {"color": "green", "x": 3, "y": 5},
            {"color": "green", "x": 6, "y": 3},
            {"color": "red", "x": 2, "y": 6}
        ],
        "walls": [{"x": 4, "y": 4}, {"x": 5, "y": 4}, {"x": 4, "y": 5}]
    });
    let mut played = board(level.clone());
    played.rotate_block(BlockIndex(1)).unwrap();
    let outcome = played.move_block(BlockIndex(1), Pos::new(1, 5)).unwrap();
    assert!(outcome.block_disappeared);
    // The rescued red dog at (2, 6) no longer blocks the green T.
    let outcome = played.move_block(BlockIndex(0), Pos::new(1, 5)).unwrap();
    assert_eq!(outcome.rescued_dogs, vec![DogIndex(0)]);
    assert!(played.move_obstacle(ObstacleId(0), Pos::new(0, 7)).is_err());
    let snapshot = played.snapshot();

    let mut fresh = board(level);
    fresh.restore(&snapshot).unwrap();
    assert_eq!(fresh.snapshot(), snapshot);
    for (a, b) in fresh.blocks().iter().zip(played.blocks()) {
        assert_eq!(a.occupied_cells().collect::<Vec<_>>(), b.occupied_cells().collect::<Vec<_>>());
        assert_eq!(a.rescued(), b.rescued());
        assert_eq!(a.is_complete(), b.is_complete());
    }
    assert_eq!(fresh.dogs(), played.dogs());
}

#[test]
fn test_random_commands_keep_invariants() {
    let mut board = board(json!({
        "width": 7, "height": 7,
        "blocks": [
            {"id": "r1", "color": "red", "required": 2, "shape": "L", "x": 0, "y": 0},
            {"id": "b1", "color": "blue", "required": 1, "shape": "I", "x": 2, "y": 6},
            {"id": "g1", "color": "green", "required": 3, "shape": "T", "x": 4, "y": 0}
        ],
        "dogs": [
            {"color": "red", "x": 5, "y": 5},
            {"color": "red", "x": 1, "y": 4},
            {"color": "blue", "x": 3, "y": 2},
            {"color": "green", "x": 6, "y": 3},
            {"color": "green", "x": 0, "y": 6}
        ],
        "walls": [{"x": 3, "y": 3}, {"x": 4, "y": 3}, {"x": 2, "y": 4}]
    }));
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);

    for _ in 0..2000 {
        let before = board.snapshot();
        let pos = Pos::new(rng.below(9) - 1, rng.below(9) - 1);
        let accepted = match rng.below(3) {
            0 => board.move_block(BlockIndex(rng.below(3) as usize), pos).is_ok(),
            1 => board.rotate_block(BlockIndex(rng.below(3) as usize)).is_ok(),
            _ => {
                let id = board.obstacles()[rng.below(2) as usize].id();
                board.move_obstacle(id, pos).is_ok()
            }
        };
        if !accepted {
            assert_eq!(board.snapshot(), before, "rejected command mutated the board");
        }

        assert_no_overlaps(&board);
        for block in board.blocks() {
            assert!(block.rescued() <= block.required());
        }
        assert_eq!(
            board.is_won(),
            board.dogs().all().iter().all(|d| d.is_rescued())
        );
    }
}
