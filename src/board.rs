use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_CELLS, N};
use crate::error::{EngineError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Slot of this mark's queue inside a `Position`.
    pub(crate) fn slot(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(EngineError::InvalidMark(s.to_string())),
        }
    }
}

pub type Cell = Option<Mark>;

/// Parse one cell as sent by a front-end: `"X"`, `"O"`, or an empty marker.
pub fn parse_cell(symbol: &str, position: usize) -> Result<Cell> {
    match symbol.trim() {
        "" | "." | "-" | "_" => Ok(None),
        "X" | "x" => Ok(Some(Mark::X)),
        "O" | "o" => Ok(Some(Mark::O)),
        _ => Err(EngineError::InvalidCellSymbol {
            symbol: symbol.to_string(),
            position,
        }),
    }
}

/// The 3x3 grid, row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a slice of any length, rejecting anything but 9.
    pub(crate) fn from_slice(cells: &[Cell]) -> Result<Self> {
        let cells: [Cell; BOARD_CELLS] = cells
            .try_into()
            .map_err(|_| EngineError::InvalidBoardSize { got: cells.len() })?;
        Ok(Self { cells })
    }

    /// Parse a board from per-cell strings, the shape the JSON API uses.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self> {
        if symbols.len() != BOARD_CELLS {
            return Err(EngineError::InvalidBoardSize { got: symbols.len() });
        }
        let cells = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| parse_cell(s.as_ref(), i))
            .collect::<Result<Vec<Cell>>>()?;
        Self::from_slice(&cells)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Cell {
        self.cells.get(idx).copied().flatten()
    }

    #[inline]
    pub fn is_empty_at(&self, idx: usize) -> bool {
        idx < BOARD_CELLS && self.cells[idx].is_none()
    }

    #[inline]
    pub(crate) fn set(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BOARD_CELLS).filter(|&i| self.cells[i].is_none())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// Compact single-line form, e.g. `XX.OO....`.
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or('.', Mark::symbol))
            .collect()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse the compact form. Whitespace, `|` and `/` are ignored so
    /// `"XX.|OO.|..."` works too.
    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<String> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .map(String::from)
            .collect();
        Self::from_symbols(&symbols)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = self.cells[row * N + col].map_or('.', Mark::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_mark_from_str() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert_eq!(" o ".parse::<Mark>().unwrap(), Mark::O);
        assert!("z".parse::<Mark>().is_err());
        for colour in ["b", "black", "w", "white"] {
            assert!(matches!(
                colour.parse::<Mark>(),
                Err(EngineError::InvalidMark(_))
            ));
        }
    }

    #[test]
    fn test_parse_compact() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(3), Some(Mark::O));
        assert_eq!(board.get(2), None);
        assert_eq!(board.to_compact(), "XX.OO....");

        let grid: Board = "XX.|OO.|...".parse().unwrap();
        assert_eq!(grid, board);
    }

    #[test]
    fn test_from_symbols_accepts_empty_strings() {
        let board = Board::from_symbols(&["X", "", "", "", "O", "", "", "", ""]).unwrap();
        assert_eq!(board.count(Mark::X), 1);
        assert_eq!(board.count(Mark::O), 1);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let err = Board::from_symbols(&["X"; 8]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoardSize { got: 8 }));

        let err = Board::from_slice(&[None; 10]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoardSize { got: 10 }));
    }

    #[test]
    fn test_bad_symbol_rejected() {
        let err = "XX?OO....".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidCellSymbol { position: 2, .. }
        ));
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board: Board = "X.O.X.O.X".parse().unwrap();
        let empties: Vec<usize> = board.empty_cells().collect();
        assert_eq!(empties, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_display() {
        let board: Board = "X.O......".parse().unwrap();
        assert_eq!(board.to_string(), "X . O \n. . . \n. . . \n");
    }
}
