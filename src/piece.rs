use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Piece types a pawn may become when it reaches the last rank
    pub const PROMOTION_CHOICES: [PieceType; 4] = [Queen, Rook, Bishop, Knight];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(Pawn),
            'n' => Some(Knight),
            'b' => Some(Bishop),
            'r' => Some(Rook),
            'q' => Some(Queen),
            'k' => Some(King),
            _ => None,
        }
    }
    pub fn is_promotion_choice(&self) -> bool {
        Self::PROMOTION_CHOICES.contains(self)
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Pawn => "p",
                Knight => "n",
                Bishop => "b",
                Rook => "r",
                Queen => "q",
                King => "k",
            }
        )
    }
}

/// Discriminants are used to index per-color arrays (white first)
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }
    /// Row holding this side's king and rooks in the initial position
    pub fn back_row(&self) -> usize {
        match self {
            White => 7,
            Black => 0,
        }
    }
    pub fn pawn_start_row(&self) -> usize {
        match self {
            White => 6,
            Black => 1,
        }
    }
    /// Row a pawn of this color promotes on
    pub fn promotion_row(&self) -> usize {
        self.opposite().back_row()
    }
    /// Row delta of a pawn push (white pawns walk towards row 0)
    pub fn pawn_direction(&self) -> i8 {
        match self {
            White => -1,
            Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &White { "White" } else { "Black" })
    }
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { piece_type, color }
    }

    /// Uppercase letters are white pieces, lowercase letters black ones
    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_lowercase() { Black } else { White };
        Some(Piece { piece_type, color })
    }

    pub fn is(&self, color: Color, piece_type: PieceType) -> bool {
        self.color == color && self.piece_type == piece_type
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pieces_round_trip_through_their_letters() {
        for c in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(piece.to_string(), c.to_string());
        }
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn pawn_geometry_depends_on_color() {
        assert_eq!(White.pawn_start_row(), 6);
        assert_eq!(White.promotion_row(), 0);
        assert_eq!(Black.pawn_start_row(), 1);
        assert_eq!(Black.promotion_row(), 7);
        assert_eq!(White.pawn_direction(), -Black.pawn_direction());
    }

    #[test]
    fn only_four_promotion_choices() {
        assert!(Queen.is_promotion_choice());
        assert!(Knight.is_promotion_choice());
        assert!(!Pawn.is_promotion_choice());
        assert!(!King.is_promotion_choice());
    }
}
