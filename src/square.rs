use std::fmt::{Display, Formatter};

/// A board coordinate. Row 0 is Black's back rank (rank 8), row 7 White's
/// back rank (rank 1); column 0 is the a-file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from in-board coordinates.
    /// Panics when either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Square {
        assert!(row < 8 && col < 8, "square ({}, {}) is off the board", row, col);
        Square {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Fallible counterpart of [`Square::new`]
    /// ```
    /// use gambit::square::Square;
    /// assert_eq!(Square::try_new(0, 7), Some(Square::new(0, 7)));
    /// assert_eq!(Square::try_new(8, 0), None);
    /// assert_eq!(Square::try_new(3, -1), None);
    /// ```
    pub fn try_new(row: i8, col: i8) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }
    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// The square reached by shifting this one, if it is still on the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Parses a square from a given string slice,
    /// only caring that the first two characters form a valid square representation
    /// ```
    /// use gambit::square::Square;
    /// assert_eq!(Square::parse("e4"), Some(Square::new(4, 4)));
    /// assert_eq!(Square::parse("a8"), Some(Square::new(0, 0)));
    /// assert_eq!(Square::parse("h1someotherstuff"), Some(Square::new(7, 7)));
    /// assert_eq!(Square::parse("randoma1stuff"), None);
    /// assert_eq!(Square::parse("k9"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars_iter = s.chars();
        let col = match chars_iter.next()? {
            c @ 'a'..='h' => c as usize - 'a' as usize,
            _ => return None,
        };
        let row = match chars_iter.next()?.to_digit(10) {
            Some(rank) if (1..=8).contains(&rank) => 8 - rank as usize,
            _ => return None,
        };
        Some(Square::new(row, col))
    }

    /// Returns the file/rank notation of the square
    /// ```
    /// use gambit::square::Square;
    /// assert_eq!(Square::new(4, 4).notation(), "e4");
    /// assert_eq!(Square::new(6, 3).notation(), "d2");
    /// ```
    pub fn notation(&self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        let mut repr = file.to_string();
        repr.push(rank);
        repr
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn notation_round_trips_on_every_square() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                assert_eq!(Square::parse(&sq.notation()), Some(sq));
            }
        }
    }

    #[test]
    fn offset_stops_at_the_edge() {
        let corner = Square::new(7, 0);
        assert_eq!(corner.offset(-1, 1), Some(Square::new(6, 1)));
        assert_eq!(corner.offset(1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
    }

    #[test]
    #[should_panic]
    fn off_board_coordinates_fail_fast() {
        Square::new(8, 2);
    }
}
