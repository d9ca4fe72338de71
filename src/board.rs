use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;
use std::fmt::{Display, Formatter};

const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// The 8x8 grid of cells, indexed by row then column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const EMPTY: Board = Board {
        cells: [[None; 8]; 8],
    };

    /// The initial position
    pub fn standard() -> Board {
        let mut b = Board::EMPTY;
        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            b.add_piece(Piece::new(Black, *piece_type), Square::new(Black.back_row(), col));
            b.add_piece(Piece::new(Black, Pawn), Square::new(Black.pawn_start_row(), col));
            b.add_piece(Piece::new(White, Pawn), Square::new(White.pawn_start_row(), col));
            b.add_piece(Piece::new(White, *piece_type), Square::new(White.back_row(), col));
        }
        b
    }

    /// Builds a board from a diagram of eight rows, top row first (rank 8).
    /// Pieces use their letters (uppercase for white), `.` marks an empty cell.
    /// ```
    /// use gambit::board::Board;
    /// let board = Board::from_diagram([
    ///     "....k...",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "........",
    ///     "....P...",
    ///     "....K...",
    /// ]).unwrap();
    /// assert_eq!(board.pieces().count(), 3);
    /// assert!(Board::from_diagram(["x"; 8]).is_none());
    /// ```
    pub fn from_diagram(rows: [&str; 8]) -> Option<Board> {
        let mut b = Board::EMPTY;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != 8 {
                return None;
            }
            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                b.add_piece(Piece::from_char(c)?, Square::new(row, col));
            }
        }
        Some(b)
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row()][sq.col()]
    }

    pub fn set(&mut self, sq: Square, cell: Option<Piece>) {
        self.cells[sq.row()][sq.col()] = cell
    }

    /// Places a new piece on a given square
    pub fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.set(sq, Some(piece))
    }

    /// Clears the given square, returning the piece that has been removed if any
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row()][sq.col()].take()
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Occupied squares in row-major order, starting from a8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|p| (Square::new(row, col), p)))
        })
    }

    /// Scans the grid for the king of a color
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(color, King))
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            let mut line = format!("{} ", 8 - row);
            for cell in cells {
                match cell {
                    None => line.push_str(". "),
                    Some(p) => line.push_str(&(p.to_string() + " ")),
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        write!(f, "  a b c d e f g h")
    }
}
