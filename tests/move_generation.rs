use itertools::Itertools;
use mailbox_chess::chess::board::Board;
use mailbox_chess::chess::core::{Piece, PieceKind, Player, Square};
use mailbox_chess::chess::movegen::generate_moves;
use mailbox_chess::chess::movelist::MoveList;
use pretty_assertions::assert_eq;

/// Places pieces given in FEN symbols onto an empty board.
fn setup(pieces: &[(Square, char)]) -> Board {
    let mut board = Board::empty();
    for &(square, symbol) in pieces {
        let piece =
            Piece::try_from(symbol).unwrap_or_else(|e| panic!("parsing piece {symbol}: {e}"));
        board.put(square, piece);
    }
    board
}

fn get_moves(board: &Board, from: Square) -> Vec<String> {
    board
        .moves(from)
        .expect("generating moves")
        .iter()
        .map(Square::to_string)
        .sorted()
        .collect::<Vec<_>>()
}

fn sorted_moves(moves: &[&str]) -> Vec<String> {
    moves
        .iter()
        .map(|m| (*m).to_string())
        .sorted()
        .collect::<Vec<_>>()
}

#[test]
fn starting_moves() {
    let board = Board::starting();
    let destinations = Square::ALL
        .into_iter()
        .filter(|&square| matches!(board.at(square), Some(piece) if piece.owner == Player::White))
        .map(|square| board.moves(square).unwrap().len())
        .sum::<usize>();
    assert_eq!(destinations, 20);
    assert_eq!(get_moves(&board, Square::G1), sorted_moves(&["f3", "h3"]));
    assert_eq!(get_moves(&board, Square::B8), sorted_moves(&["a6", "c6"]));
    for square in [Square::A1, Square::C1, Square::D1, Square::E1, Square::D8] {
        assert!(get_moves(&board, square).is_empty(), "{square}");
    }
}

#[test]
fn lone_rook_has_fourteen_moves() {
    for square in Square::ALL {
        let mut board = Board::empty();
        board.put(square, Piece::new(Player::White, PieceKind::Rook));
        assert_eq!(board.moves(square).unwrap().len(), 14, "{square}");
    }
}

#[test]
fn lone_bishop() {
    let board = setup(&[(Square::A1, 'b')]);
    assert_eq!(
        get_moves(&board, Square::A1),
        sorted_moves(&["b2", "c3", "d4", "e5", "f6", "g7", "h8"])
    );
    let board = setup(&[(Square::D4, 'B')]);
    assert_eq!(board.moves(Square::D4).unwrap().len(), 13);
}

#[test]
fn queen_blocked_and_capturing() {
    let board = setup(&[
        (Square::D4, 'Q'),
        (Square::D6, 'p'),
        (Square::F6, 'P'),
        (Square::B2, 'n'),
    ]);
    assert_eq!(
        get_moves(&board, Square::D4),
        sorted_moves(&[
            // Rook directions.
            "d5", "d6", "d3", "d2", "d1", "a4", "b4", "c4", "e4", "f4", "g4", "h4",
            // Bishop directions.
            "e5", "c5", "b6", "a7", "c3", "b2", "e3", "f2", "g1",
        ])
    );
}

#[test]
fn knight_moves() {
    let board = setup(&[(Square::A1, 'N')]);
    assert_eq!(get_moves(&board, Square::A1), sorted_moves(&["b3", "c2"]));
    let board = setup(&[(Square::H8, 'n')]);
    assert_eq!(get_moves(&board, Square::H8), sorted_moves(&["f7", "g6"]));
    let board = setup(&[(Square::E4, 'N')]);
    assert_eq!(
        get_moves(&board, Square::E4),
        sorted_moves(&["c3", "c5", "d2", "d6", "f2", "f6", "g3", "g5"])
    );
    // Own pieces block, the opponent's are captured.
    let board = setup(&[(Square::E4, 'N'), (Square::F6, 'P'), (Square::D6, 'p')]);
    assert_eq!(board.moves(Square::E4).unwrap().len(), 7);
    assert!(board.moves(Square::E4).unwrap().contains(Square::D6));
}

#[test]
fn king_moves() {
    let board = setup(&[(Square::E1, 'K'), (Square::D2, 'P'), (Square::F2, 'p')]);
    assert_eq!(
        get_moves(&board, Square::E1),
        sorted_moves(&["d1", "e2", "f1", "f2"])
    );
    let board = setup(&[(Square::H8, 'k')]);
    assert_eq!(
        get_moves(&board, Square::H8),
        sorted_moves(&["g8", "g7", "h7"])
    );
}

#[test]
fn pawn_pushes() {
    let mut board = Board::starting();
    assert_eq!(get_moves(&board, Square::E2), sorted_moves(&["e3", "e4"]));
    assert_eq!(get_moves(&board, Square::E7), sorted_moves(&["e6", "e5"]));
    let _ = board.apply(Square::E2, Square::E3).unwrap();
    // Pawns that have moved can only advance by one square.
    assert_eq!(get_moves(&board, Square::E3), sorted_moves(&["e4"]));

    let board = setup(&[(Square::C2, 'P'), (Square::C4, 'n')]);
    assert_eq!(get_moves(&board, Square::C2), sorted_moves(&["c3"]));
    let board = setup(&[(Square::C2, 'P'), (Square::C3, 'n')]);
    assert!(get_moves(&board, Square::C2).is_empty());
}

#[test]
fn pawn_captures() {
    let board = setup(&[
        (Square::D4, 'P'),
        (Square::C5, 'p'),
        (Square::E5, 'N'),
        (Square::D5, 'r'),
    ]);
    assert_eq!(get_moves(&board, Square::D4), sorted_moves(&["c5"]));
    let board = setup(&[(Square::A7, 'p'), (Square::B6, 'R'), (Square::A6, 'B')]);
    assert_eq!(get_moves(&board, Square::A7), sorted_moves(&["b6"]));
    // Pawns on the last rank have nowhere to go.
    let board = setup(&[(Square::H8, 'P')]);
    assert!(get_moves(&board, Square::H8).is_empty());
}

#[test]
fn en_passant() {
    let mut board = Board::starting();
    let _ = board.apply(Square::E2, Square::E4).unwrap();
    let _ = board.apply(Square::A7, Square::A6).unwrap();
    let _ = board.apply(Square::E4, Square::E5).unwrap();
    let _ = board.apply(Square::D7, Square::D5).unwrap();
    assert!(board.at(Square::D5).unwrap().is_en_passant_eligible());
    assert_eq!(get_moves(&board, Square::E5), sorted_moves(&["d6", "e6"]));

    // Eligibility lasts for a single opponent's move.
    let _ = board.apply(Square::H2, Square::H3).unwrap();
    let _ = board.apply(Square::H7, Square::H6).unwrap();
    assert!(!board.at(Square::D5).unwrap().is_en_passant_eligible());
    assert_eq!(get_moves(&board, Square::E5), sorted_moves(&["e6"]));
}

#[test]
fn en_passant_requires_opponent_pawn() {
    let mut board = setup(&[(Square::E3, 'P'), (Square::D2, 'P')]);
    let _ = board.apply(Square::E3, Square::E4).unwrap();
    let _ = board.apply(Square::D2, Square::D4).unwrap();
    assert!(board.at(Square::D4).unwrap().is_en_passant_eligible());
    assert_eq!(get_moves(&board, Square::E4), sorted_moves(&["e5"]));
}

#[test]
fn list_reuse() {
    let board = Board::starting();
    let mut moves = MoveList::new(Square::G1);
    generate_moves(&board, &mut moves).unwrap();
    assert_eq!(moves.len(), 2);
    moves.reset(Square::E7);
    generate_moves(&board, &mut moves).unwrap();
    assert_eq!(moves.as_slice(), &[Square::E6, Square::E5]);
    // Generating again does not accumulate destinations.
    generate_moves(&board, &mut moves).unwrap();
    assert_eq!(moves.len(), 2);
    moves.clear();
    moves.clear();
    assert!(moves.is_empty());
}
