use criterion::{criterion_group, criterion_main, Criterion};
use gambit::{Board, CastlingRights, Color, GameState, PieceType};

// A pure perft function, with no node counting, simply legal move generation
// and make/unmake
fn perft(state: &mut GameState, depth: u64) {
    if depth == 0 {
        return;
    }
    for m in &state.get_valid_moves() {
        state.make(*m);
        if state.pending_promotion().is_some() {
            state.promote(PieceType::Queen).ok();
        }
        perft(state, depth - 1);
        state.unmake();
    }
}

fn perft_bench(c: &mut Criterion) {
    let mut state = GameState::new();
    c.bench_function("perft initial 3", |b| b.iter(|| perft(&mut state, 3)));

    let kiwipete = Board::from_diagram([
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
    let mut state = GameState::from_board(kiwipete, Color::White, CastlingRights::new()).unwrap();
    c.bench_function("perft kiwipete 2", |b| b.iter(|| perft(&mut state, 2)));

    let mut state = GameState::new();
    c.bench_function("legal moves initial", |b| b.iter(|| state.get_valid_moves()));
}

criterion_group!(benches, perft_bench);
criterion_main!(benches);
