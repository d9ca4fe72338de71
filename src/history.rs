use crate::castling::CastlingRights;
use crate::square::Square;

/// The part of a position a move cannot rebuild on its own. It is copied onto
/// each move as it is committed so that unmaking it is exact.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub castling_rights: CastlingRights,
    pub ep_target: Option<Square>,
    pub halfmove_clock: u32,
    /// Indexed by `Color as usize`
    pub king_squares: [Square; 2],
}
