use std::collections::VecDeque;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use tictactoe::cache::LruCache;
use tictactoe::eval::{evaluate, Evaluator};
use tictactoe::rules::{winner_by_lines, winner_by_scan};
use tictactoe::{
    check_winner, deserialize_board_state, replay_game, serialize_board_state, AIEngine, Board,
    Cell, Difficulty, EngineConfig, Move, Player,
};

fn arb_size() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![3usize, 4, 5, 6, 7, 8])
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Player::X)),
        1 => Just(Some(Player::O)),
    ]
}

fn arb_cells(size: usize) -> impl Strategy<Value = Board> {
    prop::collection::vec(arb_cell(), size * size)
        .prop_map(move |cells| Board::from_cells(cells, size).unwrap())
}

/// Arbitrary cell contents, not necessarily reachable in play
fn arb_board() -> impl Strategy<Value = Board> {
    arb_size().prop_flat_map(arb_cells)
}

/// Same as `arb_board` but over every supported size, 3 through 20
fn arb_any_board() -> impl Strategy<Value = Board> {
    (3usize..=20).prop_flat_map(arb_cells)
}

/// Play random alternating moves from the empty board, stopping before the
/// game ends. Returns the moves actually played.
fn random_game(size: usize, seed: u64, plies: usize) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(size).unwrap();
    let mut moves = Vec::new();
    let mut player = Player::X;

    for _ in 0..plies {
        let Some(&pos) = board.available_moves().choose(&mut rng) else {
            break;
        };
        let next = board.make_move(pos, player).unwrap();
        if check_winner(&next).is_over() {
            break;
        }
        board = next;
        moves.push(Move::new(pos, player));
        player = player.opponent();
    }
    moves
}

fn play(size: usize, moves: &[Move]) -> Board {
    moves.iter().fold(Board::new(size).unwrap(), |b, m| {
        b.make_move(m.position, m.player).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_win_detectors_agree(board in arb_any_board()) {
        prop_assert_eq!(winner_by_lines(&board), winner_by_scan(&board));
        prop_assert_eq!(check_winner(&board), winner_by_lines(&board));
    }

    #[test]
    fn prop_evaluation_is_antisymmetric(board in arb_board()) {
        prop_assert_eq!(evaluate(&board, Player::X), -evaluate(&board, Player::O));
    }

    #[test]
    fn prop_cached_evaluation_matches_direct(board in arb_board()) {
        let mut evaluator = Evaluator::new(16);
        let first = evaluator.evaluate(&board, Player::O);
        let second = evaluator.evaluate(&board, Player::O);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, evaluate(&board, Player::O));
    }

    #[test]
    fn prop_replay_matches_folded_moves(
        size in arb_size(),
        seed in any::<u64>(),
        plies in 0usize..40,
    ) {
        let moves = random_game(size, seed, plies);
        let snapshots = replay_game(&moves, size);

        prop_assert_eq!(snapshots.len(), moves.len() + 1);
        for (i, snapshot) in snapshots.iter().enumerate() {
            prop_assert_eq!(snapshot, &play(size, &moves[..i]));
            prop_assert_eq!(snapshot.filled_count(), i);
        }
    }

    #[test]
    fn prop_history_round_trip(
        size in arb_size(),
        seed in any::<u64>(),
        plies in 0usize..40,
    ) {
        let moves = random_game(size, seed, plies);
        let board = play(size, &moves);

        let json = serialize_board_state(&board, &moves).unwrap();
        let record = deserialize_board_state(&json);
        prop_assert_eq!(record.board, board);
        prop_assert_eq!(record.moves, moves);
        prop_assert_eq!(record.size, size);
    }

    #[test]
    fn prop_lru_keeps_most_recent(
        capacity in 1usize..8,
        keys in prop::collection::vec(0u8..16, 0..64),
    ) {
        let mut cache = LruCache::new(capacity);
        let mut model: VecDeque<u8> = VecDeque::new();

        for key in keys {
            let evicted = cache.put(key, u32::from(key) * 10);
            if let Some(at) = model.iter().position(|&k| k == key) {
                model.remove(at);
                prop_assert!(evicted.is_none());
            } else if model.len() == capacity {
                let oldest = model.pop_back();
                prop_assert_eq!(evicted.map(|(k, _)| k), oldest);
            }
            model.push_front(key);
            prop_assert!(cache.len() <= capacity);
        }

        let keys: Vec<u8> = cache.keys().copied().collect();
        prop_assert_eq!(keys, model.iter().copied().collect::<Vec<_>>());
        for key in &model {
            prop_assert_eq!(cache.peek(key), Some(&(u32::from(*key) * 10)));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_every_difficulty_plays_a_legal_move(
        size in arb_size(),
        seed in any::<u64>(),
        plies in 0usize..30,
        difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
    ) {
        let moves = random_game(size, seed, plies);
        let board = play(size, &moves);
        prop_assume!(!board.is_full());

        let mut engine = AIEngine::with_config(EngineConfig {
            time_budget_ms: 20,
            seed: Some(seed),
            ..EngineConfig::default()
        });
        let player = board.side_to_move();
        let pos = engine.get_move(&board, player, difficulty);

        prop_assert!(pos.is_some());
        let pos = pos.unwrap();
        prop_assert!(pos < board.cell_count());
        prop_assert!(board.is_empty_at(pos));
        prop_assert!(engine.last_failure().is_none());
    }
}
