use std::time::Instant;

use log::info;

pub mod board;
pub mod castling;
pub mod console;
pub mod game_state;
pub mod history;
pub mod move_generator;
pub mod movelist;
pub mod piece;
pub mod r#move;
pub mod square;

pub use crate::board::Board;
pub use crate::castling::{CastleSide, CastlingRights};
pub use crate::game_state::{DrawReason, GameState, GameStatus, PendingPromotion, PromotionError};
pub use crate::movelist::MoveList;
pub use crate::piece::{Color, Piece, PieceType};
pub use crate::r#move::Move;
pub use crate::square::Square;

/// A game in the standard initial position, White to move
pub fn new_game() -> GameState {
    GameState::new()
}

/// Legal moves of the side to move; refreshes the check, checkmate and
/// stalemate flags of `state`
pub fn get_valid_moves(state: &mut GameState) -> MoveList {
    state.get_valid_moves()
}

/// Commits a move taken from the latest `get_valid_moves` result
pub fn make_move(state: &mut GameState, mv: Move) {
    state.make(mv)
}

/// Reverts the last committed move, doing nothing on an empty history
pub fn undo_move(state: &mut GameState) {
    state.unmake()
}

/// Whether the opponent of the side to move attacks the square.
/// Panics when the coordinates are off the board.
pub fn square_under_attack(state: &GameState, row: usize, col: usize) -> bool {
    state.square_under_attack(Square::new(row, col))
}

pub fn insufficient_material(state: &GameState) -> bool {
    state.insufficient_material()
}

/// Counts the leaf nodes of the legal move tree, `depth` plies deep.
/// Promotions are counted once and completed with a queen.
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = state.get_valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in &moves {
        state.make(*mv);
        if state.pending_promotion().is_some() {
            state.promote(PieceType::Queen).ok();
        }
        nodes += perft(state, depth - 1);
        state.unmake();
    }
    nodes
}

/// Runs perft from the initial position for every depth up to `depth`,
/// printing node counts and speed
pub fn run_perft(depth: u32) {
    let mut state = GameState::new();
    println!("{}\n", state);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = perft(&mut state, d);
        let elapsed = start.elapsed();
        println!(
            "{}     {} ({}s, {} nps)",
            d,
            nodes,
            elapsed.as_secs_f32(),
            nodes as f32 / elapsed.as_secs_f32()
        );
        info!("perft({}) = {} in {:?}", d, nodes, elapsed);
    }
}
