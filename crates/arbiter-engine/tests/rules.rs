//! End-to-end rules tests: full games and constructed positions exercising
//! castling, en passant, promotion, and mate detection.

use arbiter_engine::{
    Alliance, Board, BoardBuilder, Move, MoveStatus, Piece, PieceKind, Square,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

/// Resolves and executes a move, asserting it completes.
fn play(board: &Board, from: &str, to: &str) -> Board {
    let mv = Move::find(board, sq(from), sq(to));
    let transition = board
        .current_player()
        .make_move(board, &mv)
        .expect("board invariants hold");
    assert_eq!(
        transition.status(),
        MoveStatus::Done,
        "{}{} should complete",
        from,
        to
    );
    transition.into_board()
}

fn king_count(board: &Board, alliance: Alliance) -> usize {
    board
        .pieces(alliance)
        .iter()
        .filter(|piece| piece.kind().is_king())
        .count()
}

#[test]
fn every_reachable_board_has_one_king_per_side() {
    let board = play(&play(&Board::standard(), "e2", "e4"), "e7", "e5");
    assert_eq!(king_count(&board, Alliance::White), 1);
    assert_eq!(king_count(&board, Alliance::Black), 1);
}

#[test]
fn turn_alternates_after_every_accepted_move() {
    let board = Board::standard();
    assert_eq!(board.to_move(), Alliance::White);
    let board = play(&board, "g1", "f3");
    assert_eq!(board.to_move(), Alliance::Black);
    let board = play(&board, "b8", "c6");
    assert_eq!(board.to_move(), Alliance::White);
}

#[test]
fn executing_a_move_leaves_the_source_board_intact() {
    let board = Board::standard();
    let tiles_before: Vec<Option<PieceKind>> = (0u8..64)
        .map(|i| {
            board
                .piece_at(Square::from_index(i).unwrap())
                .map(Piece::kind)
        })
        .collect();

    let _next = play(&board, "d2", "d4");

    let tiles_after: Vec<Option<PieceKind>> = (0u8..64)
        .map(|i| {
            board
                .piece_at(Square::from_index(i).unwrap())
                .map(Piece::kind)
        })
        .collect();
    assert_eq!(tiles_before, tiles_after);
    assert_eq!(board.white_pieces().len(), 16);
    assert_eq!(board.black_pieces().len(), 16);
    assert_eq!(board.to_move(), Alliance::White);
}

#[test]
fn king_side_castle_moves_both_pieces_in_one_execute() {
    // 1.Nf3 Nf6 2.g3 g6 3.Bg2 Bg7 clears the white king side.
    let mut board = Board::standard();
    for (from, to) in [
        ("g1", "f3"),
        ("g8", "f6"),
        ("g2", "g3"),
        ("g7", "g6"),
        ("f1", "g2"),
        ("f8", "g7"),
    ] {
        board = play(&board, from, to);
    }

    let castle = Move::find(&board, sq("e1"), sq("g1"));
    assert!(castle.is_castle());
    assert_eq!(castle.to_string(), "O-O");

    let board = play(&board, "e1", "g1");
    let king = board.piece_at(sq("g1")).unwrap();
    let rook = board.piece_at(sq("f1")).unwrap();
    assert_eq!(king.kind(), PieceKind::King);
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(king.has_moved());
    assert!(rook.has_moved());
    assert!(board.piece_at(sq("e1")).is_none());
    assert!(board.piece_at(sq("h1")).is_none());
}

#[test]
fn en_passant_captures_the_jumped_pawn_by_absence() {
    // 1.e4 a6 2.e5 d5 and the d-pawn's jump may be answered in passing.
    let mut board = Board::standard();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        board = play(&board, from, to);
    }

    let jumped = board.en_passant_pawn().expect("jump recorded");
    assert_eq!(jumped.square(), sq("d5"));

    let capture = Move::find(&board, sq("e5"), sq("d6"));
    assert!(matches!(capture, Move::EnPassant { .. }));

    let board = play(&board, "e5", "d6");
    // The captured pawn never occupied the destination square.
    assert_eq!(
        board.piece_at(sq("d6")).map(Piece::kind),
        Some(PieceKind::Pawn)
    );
    assert!(board.piece_at(sq("d5")).is_none());
    assert_eq!(board.black_pieces().len(), 15);
    assert!(board.en_passant_pawn().is_none());
}

#[test]
fn en_passant_expires_if_not_taken_at_once() {
    let mut board = Board::standard();
    for (from, to) in [
        ("e2", "e4"),
        ("a7", "a6"),
        ("e4", "e5"),
        ("d7", "d5"),
        ("b1", "c3"),
        ("a6", "a5"),
    ] {
        board = play(&board, from, to);
    }
    assert!(board.en_passant_pawn().is_none());
    assert_eq!(Move::find(&board, sq("e5"), sq("d6")), Move::Null);
}

#[test]
fn promotion_always_yields_a_queen() {
    let mut builder = BoardBuilder::new();
    builder.place(Piece::new(PieceKind::King, sq("e1"), Alliance::White));
    builder.place(Piece::new(PieceKind::King, sq("h7"), Alliance::Black));
    builder.place(Piece::with_moved_flag(
        PieceKind::Pawn,
        sq("b7"),
        Alliance::White,
        true,
    ));
    let board = builder.build().unwrap();

    let promotion = Move::find(&board, sq("b7"), sq("b8"));
    assert!(matches!(promotion, Move::Promotion { .. }));
    assert_eq!(promotion.to_string(), "b8=Q");

    let board = play(&board, "b7", "b8");
    assert_eq!(
        board.piece_at(sq("b8")).map(Piece::kind),
        Some(PieceKind::Queen)
    );
    assert!(!board
        .white_pieces()
        .iter()
        .any(|piece| piece.kind() == PieceKind::Pawn));
    assert_eq!(board.to_move(), Alliance::Black);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut board = Board::standard();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
        board = play(&board, from, to);
    }
    let board = play(&board, "d8", "h4");

    let white = board.current_player();
    assert_eq!(white.alliance(), Alliance::White);
    assert!(white.is_in_check());
    assert!(white.is_in_checkmate(&board));
    assert!(!white.is_in_stalemate(&board));

    // No legal move completes.
    for mv in white.legal_moves() {
        let transition = white.make_move(&board, mv).unwrap();
        assert_ne!(transition.status(), MoveStatus::Done);
    }

    // The winner is not the one mated.
    assert!(!board.opponent_player().is_in_checkmate(&board));
}

#[test]
fn check_without_mate_is_neither_mate_nor_stalemate() {
    let mut board = Board::standard();
    for (from, to) in [("e2", "e4"), ("f7", "f6")] {
        board = play(&board, from, to);
    }
    let board = play(&board, "d1", "h5");

    let black = board.current_player();
    assert!(black.is_in_check());
    assert!(!black.is_in_checkmate(&board));
    assert!(!black.is_in_stalemate(&board));

    // Blocking with the g-pawn is the escape.
    let block = Move::find(&board, sq("g7"), sq("g6"));
    let transition = black.make_move(&board, &block).unwrap();
    assert_eq!(transition.status(), MoveStatus::Done);
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    // Black to move: Ka8 against Kb6 + Qc7. The king is not attacked but
    // every flight square is.
    let mut builder = BoardBuilder::new();
    builder.place(Piece::new(PieceKind::King, sq("a8"), Alliance::Black));
    builder.place(Piece::new(PieceKind::King, sq("b6"), Alliance::White));
    builder.place(Piece::new(PieceKind::Queen, sq("c7"), Alliance::White));
    builder.set_mover(Alliance::Black);
    let board = builder.build().unwrap();

    let black = board.current_player();
    assert!(!black.is_in_check());
    assert!(black.is_in_stalemate(&board));
    assert!(!black.is_in_checkmate(&board));
}

#[test]
fn unmatched_coordinates_resolve_to_the_null_move() {
    let board = Board::standard();
    let mv = Move::find(&board, sq("e2"), sq("d5"));
    assert_eq!(mv, Move::Null);

    let transition = board.current_player().make_move(&board, &mv).unwrap();
    assert_eq!(transition.status(), MoveStatus::IllegalMove);
    assert_eq!(transition.board().to_move(), Alliance::White);
    assert_eq!(transition.board().white_pieces().len(), 16);
}

mod playouts {
    use super::*;
    use proptest::prelude::*;

    fn completable_moves(board: &Board) -> Vec<Move> {
        board
            .current_player()
            .legal_moves()
            .iter()
            .filter(|mv| {
                matches!(
                    board.current_player().make_move(board, mv),
                    Ok(t) if t.status().is_done()
                )
            })
            .cloned()
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn random_playouts_preserve_invariants(
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..30)
        ) {
            let mut board = Board::standard();
            for pick in picks {
                let moves = completable_moves(&board);
                if moves.is_empty() {
                    // Mate or stalemate ends the playout.
                    break;
                }
                let mv = moves[pick.index(moves.len())].clone();
                let next = board
                    .current_player()
                    .make_move(&board, &mv)
                    .unwrap()
                    .into_board();

                prop_assert_eq!(next.to_move(), board.to_move().opposite());
                prop_assert_eq!(king_count(&next, Alliance::White), 1);
                prop_assert_eq!(king_count(&next, Alliance::Black), 1);
                board = next;
            }
        }
    }
}
