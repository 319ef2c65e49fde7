//! Property tests for placement, line clearing and session invariants.

use blockfall_engine::{
    Block, Board, GameConfig, GameSession, Piece, PieceKind, PiecePosition, PieceRotation,
    PieceRule, PieceSeed,
};
use proptest::prelude::*;

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn board() -> impl Strategy<Value = Board> {
    // Mostly empty cells so that full rows and valid placements both show up,
    // plus a chance of forcing whole rows full.
    (
        prop::collection::vec(
            prop::option::weighted(0.3, piece_kind()),
            Board::WIDTH * Board::HEIGHT,
        ),
        prop::collection::vec(any::<bool>(), Board::HEIGHT),
    )
        .prop_map(|(cells, full_rows)| {
            let mut board = Board::EMPTY;
            for (i, cell) in cells.into_iter().enumerate() {
                let (x, y) = (i % Board::WIDTH, i / Board::WIDTH);
                let block = if full_rows[y] && y % 3 == 0 {
                    Block::Piece(PieceKind::I)
                } else {
                    cell.map_or(Block::Empty, Block::Piece)
                };
                board.set_block(x, y, block);
            }
            board
        })
}

fn piece() -> impl Strategy<Value = Piece> {
    (piece_kind(), 0..4u8, -4..14i8, -5..22i8).prop_map(|(kind, rotation, x, y)| {
        Piece::with_placement(kind, PieceRotation::new(rotation), PiecePosition::new(x, y))
    })
}

fn is_full(row: &[Block]) -> bool {
    row.iter().all(|b| b.is_piece())
}

proptest! {
    #[test]
    fn placement_matches_cell_rules(board in board(), piece in piece()) {
        let expected = piece.occupied_cells().all(|(x, y)| {
            let inside = (0..10).contains(&x) && y < 20;
            let free = match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) => board.block(x, y) == Some(Block::Empty),
                _ => y < 0,
            };
            inside && free
        });
        prop_assert_eq!(board.is_valid_placement(&piece.shape(), piece.position()), expected);
        prop_assert_eq!(board.is_colliding(piece), !expected);
    }

    #[test]
    fn four_rotations_restore_shape(kind in piece_kind(), rotation in 0..4u8) {
        let shape = kind.shape(PieceRotation::new(rotation));
        let turned = shape.rotated_right().rotated_right().rotated_right().rotated_right();
        prop_assert_eq!(turned, shape);
        prop_assert_eq!(shape.rotated_right(), kind.shape(PieceRotation::new(rotation + 1)));
    }

    #[test]
    fn clearing_keeps_height_and_order(board in board()) {
        let kept: Vec<_> = board.rows().iter().filter(|row| !is_full(&row[..])).copied().collect();
        let full = Board::HEIGHT - kept.len();

        let (cleared, count) = board.without_full_lines();
        prop_assert_eq!(count, full);
        prop_assert_eq!(cleared.rows().len(), Board::HEIGHT);
        prop_assert!(cleared.rows()[..count].iter().flatten().all(|b| b.is_empty()));
        prop_assert_eq!(&cleared.rows()[count..], &kept[..]);

        let (again, count) = cleared.without_full_lines();
        prop_assert_eq!(count, 0);
        prop_assert_eq!(again, cleared);
    }

    #[test]
    fn merge_writes_only_visible_cells(piece in piece()) {
        prop_assume!(Board::EMPTY.is_valid_placement(&piece.shape(), piece.position()));
        let merged = Board::EMPTY.merged(piece);
        let visible = piece.occupied_cells().filter(|(_, y)| *y >= 0).count();
        let filled = merged.rows().iter().flatten().filter(|b| b.is_piece()).count();
        prop_assert_eq!(filled, visible);
    }

    #[test]
    fn random_play_respects_session_invariants(
        seed in any::<[u8; 16]>(),
        bag7 in any::<bool>(),
        moves in prop::collection::vec((0..4u8, -5..5i8), 1..60),
    ) {
        let rule = if bag7 { PieceRule::Bag7 } else { PieceRule::Uniform };
        let mut session = GameSession::with_config(GameConfig {
            seed: Some(PieceSeed::from_bytes(seed)),
            rule,
        });

        for (rotations, shift) in moves {
            if session.session_state().is_game_over() {
                break;
            }
            let before = session.stats().clone();
            let next = session.next_piece();

            for _ in 0..rotations {
                _ = session.try_rotate();
            }
            for _ in 0..shift.unsigned_abs() {
                _ = if shift < 0 { session.try_move_left() } else { session.try_move_right() };
            }
            prop_assert!(!session.board().is_colliding(session.falling_piece()));

            let lock = session.hard_drop().unwrap();
            let stats = session.stats();
            prop_assert!(lock.cleared_lines <= 4);
            prop_assert_eq!(stats.score(), before.score() + lock.points);
            prop_assert_eq!(lock.points, [0, 100, 300, 500, 800][lock.cleared_lines] * before.level());
            prop_assert_eq!(stats.cleared_lines(), before.cleared_lines() + lock.cleared_lines);
            prop_assert_eq!(stats.level(), stats.cleared_lines() / 10 + 1);
            prop_assert_eq!(lock.game_over, session.session_state().is_game_over());
            if !lock.game_over {
                prop_assert_eq!(session.falling_piece(), Piece::new(next));
            }

            let snapshot = session.snapshot();
            for (x, y) in session.falling_piece().occupied_cells() {
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                    prop_assert_eq!(
                        snapshot.board().block(x, y),
                        Some(Block::Piece(session.falling_piece().kind()))
                    );
                }
            }
        }
    }
}
