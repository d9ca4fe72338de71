use crate::{
    castling::CastleSide,
    game_state::GameState,
    movelist::MoveList,
    piece::{Color, Piece, PieceType},
    r#move::Move,
    square::Square,
};
use log::trace;

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum GenType {
    /// Every pseudo-legal move, castling included
    PseudoLegal,
    /// Squares the side attacks: pawns only strike diagonally (occupied or
    /// not), kings only reach their neighbours, and castling is left out
    Attacks,
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const CARDINALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Generates the pseudo-legal moves (or attacks) of `side`, whoever is to move
pub fn generate(state: &GameState, side: Color, gen_type: GenType) -> MoveList {
    let mut move_list = MoveList::default();
    for (origin, piece) in state.board().pieces().filter(|(_, p)| p.color == side) {
        match piece.piece_type {
            PieceType::Pawn => pawn_moves(state, origin, piece, gen_type, &mut move_list),
            PieceType::Knight => step_moves(state, origin, piece, &KNIGHT_OFFSETS, &mut move_list),
            PieceType::Bishop => slider_moves(state, origin, piece, &DIAGONALS, &mut move_list),
            PieceType::Rook => slider_moves(state, origin, piece, &CARDINALS, &mut move_list),
            PieceType::Queen => {
                slider_moves(state, origin, piece, &CARDINALS, &mut move_list);
                slider_moves(state, origin, piece, &DIAGONALS, &mut move_list);
            }
            PieceType::King => {
                step_moves(state, origin, piece, &KING_OFFSETS, &mut move_list);
                if gen_type == GenType::PseudoLegal {
                    castling(state, origin, piece, &mut move_list);
                }
            }
        }
    }
    move_list
}

/// Whether any piece of `attacker` could land on `target`
pub fn is_square_attacked(state: &GameState, target: Square, attacker: Color) -> bool {
    generate(state, attacker, GenType::Attacks)
        .iter()
        .any(|m| m.target() == target)
}

/// Keeps the pseudo-legal moves of the side to move that do not leave its own
/// king attacked. Each candidate is played and taken back on `state`, which is
/// left exactly as it was found.
pub fn legal_moves(state: &mut GameState) -> MoveList {
    let side = state.side_to_move();
    let mut legal = MoveList::default();
    for mv in &generate(state, side, GenType::PseudoLegal) {
        state.make(*mv);
        let exposes_king = state.king_in_check(side);
        state.unmake_quiet();
        if exposes_king {
            trace!("{} rejected: leaves the {} king attacked", mv, side);
        } else {
            legal.push(*mv)
        }
    }
    legal
}

fn enemy_on(state: &GameState, sq: Square, side: Color) -> Option<Piece> {
    state.board().get(sq).filter(|p| p.color != side)
}

fn pawn_moves(
    state: &GameState,
    origin: Square,
    pawn: Piece,
    gen_type: GenType,
    move_list: &mut MoveList,
) {
    let side = pawn.color;
    let dir = side.pawn_direction();

    for d_col in [-1, 1] {
        let target = match origin.offset(dir, d_col) {
            Some(sq) => sq,
            None => continue,
        };
        if gen_type == GenType::Attacks {
            move_list.push(Move::new(origin, target, pawn, enemy_on(state, target, side)));
            continue;
        }
        match state.board().get(target) {
            Some(p) if p.color != side => move_list.push(Move::new(origin, target, pawn, Some(p))),
            None if state.en_passant_target() == Some(target) => {
                let victim_square = Square::new(origin.row(), target.col());
                let victim = enemy_on(state, victim_square, side)
                    .filter(|p| p.piece_type == PieceType::Pawn);
                if let Some(victim) = victim {
                    move_list.push(Move::new_en_passant(origin, target, pawn, victim))
                }
            }
            _ => (),
        }
    }

    if gen_type == GenType::Attacks {
        return;
    }
    if let Some(single) = origin.offset(dir, 0).filter(|sq| state.board().is_empty_at(*sq)) {
        move_list.push(Move::new(origin, single, pawn, None));
        if origin.row() == side.pawn_start_row() {
            let double = single.offset(dir, 0).filter(|sq| state.board().is_empty_at(*sq));
            if let Some(double) = double {
                move_list.push(Move::new(origin, double, pawn, None))
            }
        }
    }
}

/// Knight and king moves: fixed offsets onto empty or enemy squares
fn step_moves(
    state: &GameState,
    origin: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    move_list: &mut MoveList,
) {
    for (d_row, d_col) in offsets {
        if let Some(target) = origin.offset(*d_row, *d_col) {
            match state.board().get(target) {
                Some(p) if p.color == piece.color => (),
                captured => move_list.push(Move::new(origin, target, piece, captured)),
            }
        }
    }
}

/// Walks each direction until the edge, an ally (excluded) or an enemy (captured)
fn slider_moves(
    state: &GameState,
    origin: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    move_list: &mut MoveList,
) {
    for (d_row, d_col) in directions {
        let mut current = origin;
        while let Some(target) = current.offset(*d_row, *d_col) {
            match state.board().get(target) {
                None => move_list.push(Move::new(origin, target, piece, None)),
                Some(p) => {
                    if p.color != piece.color {
                        move_list.push(Move::new(origin, target, piece, Some(p)))
                    }
                    break;
                }
            }
            current = target;
        }
    }
}

fn castling(state: &GameState, origin: Square, king: Piece, move_list: &mut MoveList) {
    let side = king.color;
    let row = side.back_row();
    if origin != Square::new(row, 4) {
        return;
    }
    let attacker = side.opposite();
    // Computed at most once, and only when some castle is otherwise possible
    let mut king_attacked = None;

    for castle in CastleSide::BOTH {
        if !state.castling_rights().has(side, castle) {
            continue;
        }
        let rook_home = Square::new(row, castle.rook_home_col());
        if state.board().get(rook_home) != Some(Piece::new(side, PieceType::Rook)) {
            continue;
        }
        if castle.empty_cols().any(|col| !state.board().is_empty_at(Square::new(row, col))) {
            continue;
        }
        if *king_attacked.get_or_insert_with(|| is_square_attacked(state, origin, attacker)) {
            return;
        }
        if castle
            .king_path_cols()
            .iter()
            .any(|col| is_square_attacked(state, Square::new(row, *col), attacker))
        {
            continue;
        }
        move_list.push(Move::new_castle(origin, Square::new(row, castle.king_target_col()), king))
    }
}

#[cfg(test)]
mod perft_tests {
    use crate::board::Board;
    use crate::castling::CastlingRights;
    use crate::game_state::GameState;
    use crate::perft;
    use crate::piece::Color;

    // Counts go up to depth 3: the engine tests legality by playing every
    // candidate, which makes deeper verification slow for a unit test
    const TEST_POSITIONS: [([&str; 8], Color, [u64; 3]); 2] = [
        (
            [
                "........",
                "..p.....",
                "...p....",
                "KP.....r",
                ".R...p.k",
                "........",
                "....P.P.",
                "........",
            ],
            Color::White,
            [14, 191, 2812],
        ),
        (
            [
                "rnbqkbnr",
                "pppppppp",
                "........",
                "........",
                "........",
                "........",
                "PPPPPPPP",
                "RNBQKBNR",
            ],
            Color::White,
            [20, 400, 8902],
        ),
    ];

    #[test]
    fn perft_verification() {
        for (diagram, side, results) in TEST_POSITIONS {
            let board = Board::from_diagram(diagram).unwrap();
            let mut state = GameState::from_board(board, side, CastlingRights::none()).unwrap();
            for d in 1..=3 {
                assert_eq!(results[d - 1], perft(&mut state, d as u32))
            }
        }
    }

    #[test]
    fn perft_kiwipete() {
        let board = Board::from_diagram([
            "r...k..r",
            "p.ppqpb.",
            "bn..pnp.",
            "...PN...",
            ".p..P...",
            "..N..Q.p",
            "PPPBBPPP",
            "R...K..R",
        ])
        .unwrap();
        let mut state = GameState::from_board(board, Color::White, CastlingRights::new()).unwrap();
        assert_eq!(perft(&mut state, 1), 48);
        assert_eq!(perft(&mut state, 2), 2039);
    }
}
