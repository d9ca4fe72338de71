#![allow(dead_code)]

use gambit::{Board, CastlingRights, Color, GameState, Move, Square};

pub fn sq(s: &str) -> Square {
    Square::parse(s).unwrap()
}

pub fn position(diagram: [&str; 8], side: Color, rights: CastlingRights) -> GameState {
    GameState::from_board(Board::from_diagram(diagram).unwrap(), side, rights).unwrap()
}

/// The legal move with the given notation, if there is one
pub fn legal(state: &mut GameState, notation: &str) -> Option<Move> {
    let (origin, target) = Move::parse(notation)?;
    state.get_valid_moves().find(origin, target).copied()
}

pub fn play(state: &mut GameState, moves: &[&str]) {
    for notation in moves {
        let mv = legal(state, notation).unwrap_or_else(|| panic!("{} is not legal here", notation));
        state.make(mv);
    }
}

/// Everything make/unmake must restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    king_squares: [Square; 2],
    history_len: usize,
}

pub fn fingerprint(state: &GameState) -> Fingerprint {
    Fingerprint {
        board: state.board().clone(),
        side_to_move: state.side_to_move(),
        castling_rights: state.castling_rights(),
        ep_target: state.en_passant_target(),
        halfmove_clock: state.halfmove_clock(),
        king_squares: [state.king_square(Color::White), state.king_square(Color::Black)],
        history_len: state.history().len(),
    }
}
