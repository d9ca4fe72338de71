use crate::piece::Color;
use crate::piece::Color::{Black, White};
use crate::square::Square;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Picks the side from the direction the king travels along its row
    pub fn from_king_delta(d_col: isize) -> CastleSide {
        if d_col > 0 {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        }
    }
    pub fn rook_home_col(&self) -> usize {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }
    pub fn king_target_col(&self) -> usize {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }
    pub fn rook_target_col(&self) -> usize {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
    /// Columns strictly between king and rook, which must be empty
    pub fn empty_cols(&self) -> std::ops::Range<usize> {
        match self {
            CastleSide::KingSide => 5..7,
            CastleSide::QueenSide => 1..4,
        }
    }
    /// Columns the king passes through, destination included
    pub fn king_path_cols(&self) -> [usize; 2] {
        match self {
            CastleSide::KingSide => [5, 6],
            CastleSide::QueenSide => [3, 2],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingRights {
    pub fn new() -> CastlingRights {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
    pub fn none() -> CastlingRights {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// Returns the (kingside, queenside) castling rights of a given color
    pub fn get(&self, side: Color) -> (bool, bool) {
        match side {
            White => (self.white_kingside, self.white_queenside),
            Black => (self.black_kingside, self.black_queenside),
        }
    }
    pub fn has(&self, side: Color, castle: CastleSide) -> bool {
        let (kingside, queenside) = self.get(side);
        match castle {
            CastleSide::KingSide => kingside,
            CastleSide::QueenSide => queenside,
        }
    }
    /// Marks the given side as unable to castle
    pub fn uncastle(&mut self, side: Color) {
        self.uncastle_kingside(side);
        self.uncastle_queenside(side);
    }
    /// Marks the given side as unable to castle kingside
    pub fn uncastle_kingside(&mut self, side: Color) {
        match side {
            White => self.white_kingside = false,
            Black => self.black_kingside = false,
        }
    }
    /// Marks the given side as unable to castle queenside
    pub fn uncastle_queenside(&mut self, side: Color) {
        match side {
            White => self.white_queenside = false,
            Black => self.black_queenside = false,
        }
    }
    pub fn revoke(&mut self, side: Color, castle: CastleSide) {
        match castle {
            CastleSide::KingSide => self.uncastle_kingside(side),
            CastleSide::QueenSide => self.uncastle_queenside(side),
        }
    }

    /// Clears the right tied to a rook home square (a1, h1, a8, h8).
    /// Any other square leaves the rights untouched.
    pub fn uncastle_corner(&mut self, sq: Square) {
        for side in [White, Black] {
            if sq.row() != side.back_row() {
                continue;
            }
            for castle in CastleSide::BOTH {
                if sq.col() == castle.rook_home_col() {
                    self.revoke(side, castle)
                }
            }
        }
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == CastlingRights::none() {
            return write!(f, "-");
        }
        write!(
            f,
            "{}{}{}{}",
            if self.white_kingside { "K" } else { "" },
            if self.white_queenside { "Q" } else { "" },
            if self.black_kingside { "k" } else { "" },
            if self.black_queenside { "q" } else { "" }
        )
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_their_rights() {
        let mut rights = CastlingRights::new();
        rights.uncastle_corner(Square::parse("h1").unwrap());
        assert_eq!(rights.to_string(), "Qkq");
        rights.uncastle_corner(Square::parse("a8").unwrap());
        assert_eq!(rights.to_string(), "Qk");
        rights.uncastle_corner(Square::parse("e4").unwrap());
        assert_eq!(rights.to_string(), "Qk");
    }

    #[test]
    fn uncastle_clears_both_sides_of_one_color() {
        let mut rights = CastlingRights::new();
        rights.uncastle(Black);
        assert_eq!(rights.get(Black), (false, false));
        assert_eq!(rights.get(White), (true, true));
        rights.uncastle(White);
        assert_eq!(rights.to_string(), "-");
    }
}
