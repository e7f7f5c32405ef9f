use super::*;
use crate::error::EngineError;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::X.opponent(), Player::O);
    assert_eq!(Player::O.opponent(), Player::X);
}

#[test]
fn test_player_from_symbol() {
    assert_eq!(Player::from_symbol("X").unwrap(), Player::X);
    assert_eq!(Player::from_symbol("o").unwrap(), Player::O);
    assert_eq!(
        Player::from_symbol("Z"),
        Err(EngineError::InvalidMarker("Z".to_string()))
    );
    assert!(Player::from_symbol("").is_err());
}

#[test]
fn test_empty_board_sizes() {
    for size in MIN_SIZE..=MAX_SIZE {
        let board = Board::new(size).unwrap();
        assert_eq!(board.cell_count(), size * size);
        assert!(board.is_blank());
        assert_eq!(board.available_moves().len(), size * size);
    }
}

#[test]
fn test_invalid_sizes() {
    assert_eq!(Board::new(2), Err(EngineError::InvalidSize(2)));
    assert_eq!(Board::new(21), Err(EngineError::InvalidSize(21)));
    assert_eq!(Board::new(0), Err(EngineError::InvalidSize(0)));
}

#[test]
fn test_available_moves_ascending() {
    let board = Board::parse("X.O .X. ..O", 3).unwrap();
    assert_eq!(board.available_moves(), vec![1, 3, 5, 6, 7]);
}

#[test]
fn test_make_move_returns_new_board() {
    let board = Board::new(3).unwrap();
    let next = board.make_move(4, Player::X).unwrap();
    assert_eq!(next.get(4), Some(Player::X));
    assert_eq!(board.get(4), None, "original board must not change");
}

#[test]
fn test_make_move_rejects_occupied() {
    let board = Board::new(3).unwrap().make_move(0, Player::X).unwrap();
    assert_eq!(board.make_move(0, Player::O), Err(EngineError::Occupied(0)));
}

#[test]
fn test_make_move_rejects_out_of_range() {
    let board = Board::new(3).unwrap();
    assert_eq!(
        board.make_move(9, Player::O),
        Err(EngineError::InvalidPosition {
            position: 9,
            cells: 9
        })
    );
}

#[test]
fn test_from_cells_length_mismatch() {
    let err = Board::from_cells(vec![None; 8], 3).unwrap_err();
    assert_eq!(
        err,
        EngineError::LengthMismatch {
            expected: 9,
            actual: 8
        }
    );
}

#[test]
fn test_parse_rejects_unknown_marker() {
    assert_eq!(
        Board::parse("X.Q......", 3),
        Err(EngineError::InvalidMarker("Q".to_string()))
    );
}

#[test]
fn test_key_and_display() {
    let board = Board::parse("X.. .O. ..X", 3).unwrap();
    assert_eq!(board.key(), "X---O---X");
    assert_eq!(board.to_string(), "X . .\n. O .\n. . X\n");
}

#[test]
fn test_side_to_move() {
    let mut board = Board::new(3).unwrap();
    assert_eq!(board.side_to_move(), Player::X);
    board = board.make_move(0, Player::X).unwrap();
    assert_eq!(board.side_to_move(), Player::O);
    board = board.make_move(1, Player::O).unwrap();
    assert_eq!(board.side_to_move(), Player::X);
}

#[test]
fn test_counts() {
    let board = Board::parse("XXO ... O..", 3).unwrap();
    assert_eq!(board.count(Player::X), 2);
    assert_eq!(board.count(Player::O), 2);
    assert_eq!(board.filled_count(), 4);
    assert_eq!(board.empty_count(), 5);
    assert!(!board.is_full());
}

#[test]
fn test_row_col() {
    assert_eq!(row_col(0, 3), (0, 0));
    assert_eq!(row_col(5, 3), (1, 2));
    assert_eq!(row_col(19, 4), (4, 3));
}
