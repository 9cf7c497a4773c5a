//! Game state tests: movement, landing, rotation and the board invariants
//! that must hold after any sequence of moves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blockfall::core::{
    is_collision, rotate, template, Board, DropOutcome, GameRules, GameState, RandomSource,
    SequenceSource, Shape,
};
use blockfall::types::{Command, Phase, ShapeKind, EMPTY};

fn game_on(board: Board, kinds: &[ShapeKind]) -> GameState<SequenceSource> {
    GameState::new(
        board,
        SequenceSource::new(kinds).unwrap(),
        GameRules::default(),
    )
}

#[test]
fn test_move_down_onto_occupied_cell_lands() {
    let mut board = Board::new(20, 10);
    board.set(5, 0, 3);
    let mut state = game_on(board, &[ShapeKind::O, ShapeKind::T]);

    for _ in 0..3 {
        assert_eq!(state.move_down(), DropOutcome::Moved);
    }
    assert_eq!(state.active().y, 3);

    // Row 5 column 0 is directly below the piece now.
    assert_eq!(state.move_down(), DropOutcome::Landed { lines_cleared: 0 });
    assert_eq!(state.active().kind, ShapeKind::T);
    assert_eq!((state.active().x, state.active().y), (0, 0));
    assert_eq!(state.pieces_spawned(), 2);
    assert_eq!(state.board().filled_count(), 5);
    assert_eq!(state.board().get(3, 0), Some(4));
    assert_eq!(state.board().get(4, 1), Some(4));
}

#[test]
fn test_move_left_at_left_wall_is_noop() {
    let mut state = game_on(Board::new(20, 10), &[ShapeKind::L]);
    let before = state.snapshot();
    assert!(!state.move_left());
    assert!(!state.apply(Command::MoveLeft));
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_vertical_i_clears_four_lines() {
    let board = Board::from_rows(&[
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 2, 2, 2],
        [0, 3, 3, 3],
        [0, 5, 5, 5],
        [0, 7, 7, 7],
    ])
    .unwrap();
    let mut state = game_on(board, &[ShapeKind::I]);

    assert!(state.rotate());
    assert_eq!((state.active().shape.rows(), state.active().shape.cols()), (4, 1));
    assert_eq!(state.move_down(), DropOutcome::Moved);
    assert_eq!(state.move_down(), DropOutcome::Moved);
    assert_eq!(state.move_down(), DropOutcome::Landed { lines_cleared: 4 });
    assert_eq!(state.board(), &Board::new(6, 4));
    assert_eq!(state.phase(), Phase::Falling);
}

#[test]
fn test_rotation_never_touches_templates() {
    let mut state = game_on(Board::new(20, 10), &[ShapeKind::J]);
    for _ in 0..3 {
        assert!(state.move_down() == DropOutcome::Moved);
        state.rotate();
    }
    assert_ne!(state.active().shape, template(ShapeKind::J));

    // Land it and check the next J is a fresh template.
    while !matches!(state.move_down(), DropOutcome::Landed { .. }) {}
    assert_eq!(state.active().shape, template(ShapeKind::J));
}

#[test]
fn test_collision_matches_definition() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new(12, 8);
    for _ in 0..20 {
        let row = rng.gen_range(0..12);
        let col = rng.gen_range(0..8);
        board.set(row, col, 1);
    }

    for kind in ShapeKind::ALL {
        let mut shape = template(kind);
        for _ in 0..4 {
            for y in -4..16 {
                for x in -4..12 {
                    let expected = shape.occupied().any(|(r, c, _)| {
                        let (row, col) = (y + r as i32, x + c as i32);
                        row < 0
                            || col < 0
                            || row >= 12
                            || col >= 8
                            || board.get(row, col) != Some(EMPTY)
                    });
                    assert_eq!(
                        is_collision(&board, &shape, x, y),
                        expected,
                        "{kind:?} at ({x}, {y})"
                    );
                }
            }
            shape = rotate(&shape);
        }
    }
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut state = GameState::new(
        Board::new(20, 10),
        RandomSource::new(99),
        GameRules::default(),
    );

    let mut landings = 0;
    for _ in 0..5_000 {
        if state.is_game_over() {
            state.restart();
        }

        let filled = state.board().filled_count();
        match rng.gen_range(0..4) {
            0 => {
                state.move_left();
            }
            1 => {
                state.move_right();
            }
            2 => {
                state.rotate();
            }
            _ => {
                if let DropOutcome::Landed { lines_cleared } = state.move_down() {
                    landings += 1;
                    assert_eq!(
                        state.board().filled_count() + lines_cleared * 10,
                        filled + 4,
                        "merge writes four cells and each clear removes a full row"
                    );
                }
            }
        }

        let board = state.board();
        assert_eq!(board.iter_rows().count(), 20);
        assert!(board.iter_rows().all(|row| row.len() == 10));
        assert!(board.iter_rows().all(|row| row.contains(&EMPTY)));

        if state.phase() == Phase::Falling {
            for (row, col, _) in state.active().cells() {
                assert!((0..20).contains(&row) && (0..10).contains(&col));
                assert_eq!(board.get(row, col), Some(EMPTY));
            }
        }
    }
    assert!(landings > 10);
}

#[test]
fn test_unchecked_rules_allow_overlapping_rotation() {
    let board = Board::from_rows(&[[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 0, 0], [1, 1, 0, 0]])
        .unwrap();
    let i = Shape::from_rows(&[[1, 1, 1, 1]]).unwrap();
    assert!(is_collision(&board, &rotate(&i), 0, 0));

    let mut soft = game_on(board.clone(), &[ShapeKind::I]);
    assert!(!soft.rotate());

    let mut unchecked = GameState::new(
        board,
        SequenceSource::repeat(ShapeKind::I),
        GameRules::unchecked(),
    );
    assert!(unchecked.rotate());
    assert_eq!(unchecked.active().shape.rows(), 4);
}
