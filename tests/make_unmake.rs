mod common;

use common::{fingerprint, play};
use gambit::{new_game, undo_move, Color, GameState, PieceType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plays and takes back every legal move of the current position, checking
/// that each round trip restores the state exactly
fn check_round_trips(state: &mut GameState) {
    let before = fingerprint(state);
    let moves = state.get_valid_moves();
    for mv in &moves {
        state.make(*mv);
        assert_eq!(state.board().find_king(Color::White), Some(state.king_square(Color::White)));
        assert_eq!(state.board().find_king(Color::Black), Some(state.king_square(Color::Black)));
        if state.pending_promotion().is_some() {
            state.promote(PieceType::Queen).unwrap();
        }
        state.unmake();
        assert_eq!(fingerprint(state), before, "{} was not undone exactly", mv);
    }
}

#[test]
fn random_games_unmake_exactly() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..12 {
        let mut state = new_game();
        let mut snapshots = vec![fingerprint(&state)];
        for _ in 0..80 {
            check_round_trips(&mut state);
            let moves = state.get_valid_moves();
            if moves.is_empty() {
                break;
            }
            let mv = *moves.get(rng.gen_range(0..moves.len())).unwrap();
            state.make(mv);
            if state.pending_promotion().is_some() {
                let choice = PieceType::PROMOTION_CHOICES[rng.gen_range(0..4)];
                state.promote(choice).unwrap();
            }
            snapshots.push(fingerprint(&state));
        }

        // Unwinding the whole game walks back through every position
        snapshots.pop();
        while let Some(expected) = snapshots.pop() {
            undo_move(&mut state);
            assert_eq!(fingerprint(&state), expected);
        }
        assert!(state.history().is_empty());
        undo_move(&mut state);
        assert_eq!(fingerprint(&state), fingerprint(&new_game()));
    }
}

#[test]
fn history_length_tracks_committed_moves() {
    let mut state = new_game();
    play(&mut state, &["e2e4", "c7c5", "g1f3"]);
    assert_eq!(state.history().len(), 3);
    undo_move(&mut state);
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.side_to_move(), Color::White);
    play(&mut state, &["b1c3", "b8c6"]);
    assert_eq!(state.history().len(), 4);
}

#[test]
fn undo_recomputes_check_and_clears_terminal_flags() {
    let mut state = new_game();
    play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    state.get_valid_moves();
    assert!(state.is_checkmate());
    assert!(state.in_check());

    undo_move(&mut state);
    assert!(!state.is_checkmate());
    assert!(!state.in_check());
    assert_eq!(state.side_to_move(), Color::Black);

    play(&mut state, &["d8h4"]);
    undo_move(&mut state);
    undo_move(&mut state);
    assert_eq!(state.side_to_move(), Color::White);
}
