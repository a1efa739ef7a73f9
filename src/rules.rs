//! Terminal detection: three in a row on any of the eight fixed lines.
//!
//! There is no draw-by-occupancy. With at most three marks per side the
//! board never fills, so a game only ends when someone completes a line.

use crate::board::{Board, Mark};

/// Winning line indices, rows then columns then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Return the mark owning the first complete line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let first = board.get(a)?;
        (board.get(b) == Some(first) && board.get(c) == Some(first)).then_some(first)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_rows() {
        assert_eq!(winner(&board("XXX......")), Some(Mark::X));
        assert_eq!(winner(&board("...OOO...")), Some(Mark::O));
        assert_eq!(winner(&board("......XXX")), Some(Mark::X));
    }

    #[test]
    fn test_columns() {
        assert_eq!(winner(&board("O..O..O..")), Some(Mark::O));
        assert_eq!(winner(&board(".X..X..X.")), Some(Mark::X));
        assert_eq!(winner(&board("..O..O..O")), Some(Mark::O));
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(winner(&board("X...X...X")), Some(Mark::X));
        assert_eq!(winner(&board("..O.O.O..")), Some(Mark::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        assert_eq!(winner(&board("XXO......")), None);
        assert_eq!(winner(&board("XO.OX.X.O")), None);
    }
}
