use crate::history::Snapshot;
use crate::piece::Piece;
use crate::square::Square;
use std::fmt::{Display, Formatter};

/// A move between two squares, along with what is needed to play and unplay it.
///
/// Moves are built by the generator knowing only the current position; the
/// snapshot of the prior state (and the promotion flag) are filled in when the
/// move is committed.
///
/// Two moves are equal when they share their endpoints: the captured piece,
/// the flags and the snapshot are not part of a move's identity.
#[derive(Debug, Copy, Clone)]
pub struct Move {
    origin: Square,
    target: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    is_en_passant: bool,
    is_castle: bool,
    is_promotion: bool,
    snapshot: Option<Snapshot>,
}

impl Move {
    fn with_flags(
        origin: Square,
        target: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
        is_en_passant: bool,
        is_castle: bool,
    ) -> Move {
        Move {
            origin,
            target,
            piece_moved,
            piece_captured,
            is_en_passant,
            is_castle,
            is_promotion: false,
            snapshot: None,
        }
    }
    /// A plain move; `piece_captured` is whatever stands on the target square
    pub fn new(
        origin: Square,
        target: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
    ) -> Move {
        Self::with_flags(origin, target, piece_moved, piece_captured, false, false)
    }
    /// The captured pawn does not stand on `target` but right beside `origin`
    pub fn new_en_passant(
        origin: Square,
        target: Square,
        pawn: Piece,
        captured_pawn: Piece,
    ) -> Move {
        Self::with_flags(origin, target, pawn, Some(captured_pawn), true, false)
    }
    /// A castle is described by the king's two-file move
    pub fn new_castle(origin: Square, target: Square, king: Piece) -> Move {
        Self::with_flags(origin, target, king, None, false, true)
    }

    pub fn origin(&self) -> Square {
        self.origin
    }
    pub fn target(&self) -> Square {
        self.target
    }
    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }
    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }
    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }
    pub fn is_castle(&self) -> bool {
        self.is_castle
    }
    pub fn is_promotion(&self) -> bool {
        self.is_promotion
    }
    /// The state prior to this move, set once the move has been committed
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Square the en passant victim stands on: same row as the capturing pawn,
    /// same column as the target
    pub fn en_passant_victim_square(&self) -> Square {
        Square::new(self.origin.row(), self.target.col())
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot)
    }
    pub(crate) fn mark_promotion(&mut self) {
        self.is_promotion = true
    }
    pub(crate) fn set_piece_moved(&mut self, piece: Piece) {
        self.piece_moved = piece
    }

    /// Parses a move formatted as two concatenated squares ("e2e4").
    /// Since no information can be given on flags or pieces, it simply
    /// returns origin and target.
    /// ```
    /// use gambit::Move;
    /// use gambit::square::Square;
    /// assert_eq!(Move::parse("e2e4"), Some((Square::new(6, 4), Square::new(4, 4))));
    /// assert_eq!(Move::parse("e2"), None);
    /// assert_eq!(Move::parse("e2z9"), None);
    /// ```
    pub fn parse(mv: &str) -> Option<(Square, Square)> {
        let origin = Square::parse(mv.get(0..2)?)?;
        let target = Square::parse(mv.get(2..4)?)?;
        Some((origin, target))
    }

    /// Start and end squares, concatenated
    pub fn notation(&self) -> String {
        format!("{}{}", self.origin, self.target)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.target == other.target
    }
}

impl Eq for Move {}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin, self.target)
    }
}
