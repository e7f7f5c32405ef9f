use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tictactoe::cache::LruCache;
use tictactoe::eval::{evaluate, Evaluator};
use tictactoe::rules::{winner_by_lines, winner_by_scan};
use tictactoe::search::{Searcher, TranspositionTable};
use tictactoe::{AIEngine, Board, Difficulty, EngineConfig, Player};

fn midgame(size: usize) -> Board {
    // Deterministic spread of alternating markers
    let mut board = Board::new(size).unwrap();
    let mut player = Player::X;
    for i in 0..size * size / 3 {
        let pos = (i * 7) % (size * size);
        if board.is_empty_at(pos) {
            board = board.make_move(pos, player).unwrap();
            player = player.opponent();
        }
    }
    board
}

fn solve_opening() -> u64 {
    let board = Board::new(3).unwrap();
    let mut tt = TranspositionTable::new(50_000);
    let mut evaluator = Evaluator::new(50_000);
    let mut searcher = Searcher::new(&mut tt, &mut evaluator, Player::X);
    searcher.search(&board, 9).nodes
}

fn lru_churn(capacity: usize, ops: u64) -> usize {
    let mut cache = LruCache::new(capacity);
    for i in 0..ops {
        cache.put(i % (capacity as u64 * 2), i);
        black_box(cache.get(&(i / 2)));
    }
    cache.len()
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("solve 3x3 opening", |b| b.iter(solve_opening));

    let config = EngineConfig {
        time_budget_ms: 50,
        seed: Some(7),
        ..EngineConfig::default()
    };
    let board = midgame(4);
    c.bench_function("hard 4x4 midgame", |b| {
        b.iter(|| {
            let mut engine = AIEngine::with_config(config.clone());
            engine.get_move(black_box(&board), Player::O, Difficulty::Hard)
        })
    });

    let board = midgame(9);
    c.bench_function("medium 9x9 midgame", |b| {
        let mut engine = AIEngine::with_config(config.clone());
        b.iter(|| engine.get_move(black_box(&board), Player::O, Difficulty::Medium))
    });

    let board = midgame(7);
    c.bench_function("evaluate 7x7 uncached", |b| {
        b.iter(|| evaluate(black_box(&board), Player::X))
    });

    let board = midgame(12);
    c.bench_function("winner by lines 12x12", |b| b.iter(|| winner_by_lines(black_box(&board))));
    c.bench_function("winner by scan 12x12", |b| b.iter(|| winner_by_scan(black_box(&board))));

    c.bench_function("lru churn 1k", |b| b.iter(|| lru_churn(black_box(1_000), 10_000)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
