use std::fmt::{Display, Formatter};

use log::{debug, trace};
use thiserror::Error;

use crate::board::Board;
use crate::castling::{CastleSide, CastlingRights};
use crate::history::Snapshot;
use crate::move_generator::{is_square_attacked, legal_moves};
use crate::movelist::MoveList;
use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Rook};
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::Square;

/// Plies without a pawn move or a capture after which the game may be drawn
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// A pawn standing on its last rank, waiting for the caller to pick a piece
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    pub color: Color,
    pub square: Square,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no pawn is waiting for a promotion")]
    NotPending,
    #[error("a pawn cannot promote to a {0:?}")]
    InvalidPiece(PieceType),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    FiftyMoveRule,
}

/// What a caller shows about the game, most important condition first
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::Draw(_))
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Check(side) => write!(f, "Check! {} king is attacked", side),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {} wins", winner),
            GameStatus::Stalemate => write!(f, "Stalemate! Draw"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "Draw (insufficient material)")
            }
            GameStatus::Draw(DrawReason::FiftyMoveRule) => write!(f, "Draw (fifty-move rule)"),
        }
    }
}

/// The authoritative state of a game: the board, whose turn it is, and all
/// the bookkeeping needed to generate legal moves and take them back.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    /// Maintained incrementally, indexed by `Color as usize`
    king_squares: [Square; 2],
    history: Vec<Move>,

    in_check: bool,
    checkmate: bool,
    stalemate: bool,
    pending_promotion: Option<PendingPromotion>,
}

impl GameState {
    /// A game in the initial position, White to move
    pub fn new() -> GameState {
        GameState {
            board: Board::standard(),
            side_to_move: White,
            castling_rights: CastlingRights::new(),
            ep_target: None,
            halfmove_clock: 0,
            king_squares: [Square::new(White.back_row(), 4), Square::new(Black.back_row(), 4)],
            history: Vec::with_capacity(128),
            in_check: false,
            checkmate: false,
            stalemate: false,
            pending_promotion: None,
        }
    }

    /// Sets up a custom position. Returns `None` unless each side has exactly
    /// one king. Castling rights whose king or rook is not on its home square
    /// are dropped.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
    ) -> Option<GameState> {
        let mut king_squares = [Square::new(0, 0); 2];
        for color in [White, Black] {
            let mut kings = board.pieces().filter(|(_, p)| p.is(color, King));
            king_squares[color as usize] = kings.next()?.0;
            if kings.next().is_some() {
                return None;
            }
        }

        let mut rights = castling_rights;
        for color in [White, Black] {
            let row = color.back_row();
            if king_squares[color as usize] != Square::new(row, 4) {
                rights.uncastle(color);
            }
            for castle in CastleSide::BOTH {
                let rook_home = Square::new(row, castle.rook_home_col());
                if board.get(rook_home) != Some(Piece::new(color, Rook)) {
                    rights.revoke(color, castle);
                }
            }
        }

        let mut state = GameState {
            board,
            side_to_move,
            castling_rights: rights,
            ep_target: None,
            halfmove_clock: 0,
            king_squares,
            history: Vec::with_capacity(128),
            in_check: false,
            checkmate: false,
            stalemate: false,
            pending_promotion: None,
        };
        state.in_check = state.king_in_check(side_to_move);
        Some(state)
    }

    /// Restarts the game from the initial position
    pub fn reset(&mut self) {
        *self = GameState::new();
        debug!("game reset");
    }

    /*
    GETTERS
     */
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color as usize]
    }
    /// Committed moves, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }
    /// Whether the side to move was in check when last computed
    pub fn in_check(&self) -> bool {
        self.in_check
    }
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            castling_rights: self.castling_rights,
            ep_target: self.ep_target,
            halfmove_clock: self.halfmove_clock,
            king_squares: self.king_squares,
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.castling_rights = snapshot.castling_rights;
        self.ep_target = snapshot.ep_target;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.king_squares = snapshot.king_squares;
    }

    /*
    LEGALITY
     */

    /// Generates the legal moves of the side to move and refreshes the check,
    /// checkmate and stalemate flags accordingly
    ///
    /// Panics while a promotion is pending: the pawn has to be replaced first.
    pub fn get_valid_moves(&mut self) -> MoveList {
        assert!(
            self.pending_promotion.is_none(),
            "a promotion choice is still pending"
        );
        let side = self.side_to_move;
        let in_check = self.king_in_check(side);
        let moves = legal_moves(self);

        self.in_check = in_check;
        self.checkmate = moves.is_empty() && in_check;
        self.stalemate = moves.is_empty() && !in_check;
        if self.checkmate {
            debug!("{} is checkmated", side);
        } else if self.stalemate {
            debug!("{} is stalemated", side);
        }
        moves
    }

    /// Whether the opponent of the side to move attacks `sq`
    pub fn square_under_attack(&self, sq: Square) -> bool {
        is_square_attacked(self, sq, self.side_to_move.opposite())
    }

    /// Whether the king of `color` is attacked by the other side
    pub fn king_in_check(&self, color: Color) -> bool {
        is_square_attacked(self, self.king_square(color), color.opposite())
    }

    /*
    MAKE / UNMAKE
     */

    /// Makes a move on the board.
    /// The move is expected to come from the latest `get_valid_moves` call;
    /// anything else breaks the position.
    pub fn make(&mut self, mut mv: Move) {
        assert!(
            self.pending_promotion.is_none(),
            "a promotion choice is still pending"
        );
        debug_assert_eq!(
            self.board.get(mv.origin()).map(|p| p.color),
            Some(self.side_to_move),
            "{} does not start on a piece of the side to move",
            mv
        );

        let side = self.side_to_move;
        let origin = mv.origin();
        let target = mv.target();
        let moved = mv.piece_moved();
        mv.set_snapshot(self.snapshot());

        self.board.remove_piece(origin);
        self.board.add_piece(moved, target);

        if moved.piece_type == King {
            self.king_squares[side as usize] = target;
            self.castling_rights.uncastle(side);
        }
        if moved.piece_type == Rook {
            self.castling_rights.uncastle_corner(origin);
        }
        if mv.piece_captured().map(|p| p.piece_type) == Some(Rook) {
            self.castling_rights.uncastle_corner(target);
        }

        if mv.is_en_passant() {
            self.board.remove_piece(mv.en_passant_victim_square());
        }

        self.ep_target = if moved.piece_type == Pawn && origin.row().abs_diff(target.row()) == 2 {
            Some(Square::new((origin.row() + target.row()) / 2, origin.col()))
        } else {
            None
        };

        if mv.is_castle() {
            let castle = CastleSide::from_king_delta(target.col() as isize - origin.col() as isize);
            let row = origin.row();
            if let Some(rook) = self.board.remove_piece(Square::new(row, castle.rook_home_col())) {
                self.board.add_piece(rook, Square::new(row, castle.rook_target_col()));
            }
        }

        if moved.piece_type == Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if moved.piece_type == Pawn && target.row() == side.promotion_row() {
            mv.mark_promotion();
            self.pending_promotion = Some(PendingPromotion { color: side, square: target });
        }

        trace!("make {}", mv);
        self.history.push(mv);
        self.side_to_move = side.opposite();
    }

    /// Unmakes the move on the top of the history stack, if any
    pub fn unmake(&mut self) {
        self.unmake_quiet();
        self.checkmate = false;
        self.stalemate = false;
        self.in_check = self.king_in_check(self.side_to_move);
    }

    /// Takes back the last move without touching the check, checkmate and
    /// stalemate flags, which `make` leaves alone as well
    pub(crate) fn unmake_quiet(&mut self) {
        let mv = if let Some(m) = self.history.pop() { m } else { return };
        let side = self.side_to_move.opposite();
        let origin = mv.origin();
        let target = mv.target();

        let moved = if mv.is_promotion() { Piece::new(side, Pawn) } else { mv.piece_moved() };
        self.board.add_piece(moved, origin);

        if mv.is_en_passant() {
            self.board.remove_piece(target);
            self.board.set(mv.en_passant_victim_square(), mv.piece_captured());
        } else {
            self.board.set(target, mv.piece_captured());
        }

        if mv.is_castle() {
            let castle = CastleSide::from_king_delta(target.col() as isize - origin.col() as isize);
            let row = origin.row();
            let rook_target = Square::new(row, castle.rook_target_col());
            if let Some(rook) = self.board.remove_piece(rook_target) {
                self.board.add_piece(rook, Square::new(row, castle.rook_home_col()));
            }
        }

        if let Some(snapshot) = mv.snapshot() {
            self.restore(snapshot);
        }
        self.side_to_move = side;
        self.pending_promotion = None;
        trace!("unmake {}", mv);
    }

    /// Completes a pending promotion with the piece type chosen by the caller
    pub fn promote(&mut self, piece_type: PieceType) -> Result<(), PromotionError> {
        let pending = self.pending_promotion.ok_or(PromotionError::NotPending)?;
        if !piece_type.is_promotion_choice() {
            return Err(PromotionError::InvalidPiece(piece_type));
        }
        let piece = Piece::new(pending.color, piece_type);
        self.board.add_piece(piece, pending.square);
        if let Some(last) = self.history.last_mut() {
            last.set_piece_moved(piece);
        }
        self.pending_promotion = None;
        debug!("{} promoted on {}", piece, pending.square);
        Ok(())
    }

    /*
    TERMINATION
     */

    /// True when no piece but the kings is left, or a single knight or bishop.
    /// Two bishops, even of opposite sides, are not considered insufficient.
    pub fn insufficient_material(&self) -> bool {
        let mut others = self
            .board
            .pieces()
            .map(|(_, p)| p.piece_type)
            .filter(|t| *t != King);
        match (others.next(), others.next()) {
            (None, _) => true,
            (Some(Knight | Bishop), None) => true,
            _ => false,
        }
    }

    pub fn fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_PLIES
    }

    /// Classifies the game from the flags of the last `get_valid_moves` call
    /// and the draw predicates
    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate { winner: self.side_to_move.opposite() }
        } else if self.stalemate {
            GameStatus::Stalemate
        } else if self.in_check {
            GameStatus::Check(self.side_to_move)
        } else if self.insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.fifty_move_draw() {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else {
            GameStatus::InProgress
        }
    }

    /// The history as numbered move pairs: "1. e2e4 e7e5"
    pub fn move_log(&self) -> Vec<String> {
        self.history
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let mut line = format!("{}. {}", i + 1, pair[0]);
                if let Some(reply) = pair.get(1) {
                    line.push(' ');
                    line.push_str(&reply.notation());
                }
                line
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self.board.to_string();
        let mut lines = rendered.lines();
        let notes = [
            format!("side to move: {}", self.side_to_move),
            format!("castling rights: {}", self.castling_rights),
            format!(
                "en passant: {}",
                self.ep_target.map_or_else(|| String::from("-"), |sq| sq.notation())
            ),
            format!("halfmove clock: {}", self.halfmove_clock),
            format!("status: {}", self.status()),
        ];
        for note in notes.iter() {
            if let Some(line) = lines.next() {
                writeln!(f, "{}  {}", line, note)?;
            }
        }
        for line in lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
