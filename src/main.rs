//! Tic-Tac-Toe engine self-play
//!
//! Plays engine-vs-engine games on an N×N board and prints the final
//! positions and a results tally.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use tictactoe::board::validate_size;
use tictactoe::{
    check_winner, serialize_board_state, AIEngine, Board, Difficulty, EngineConfig, GameResult,
    Move, Player,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board dimension (3-20)
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Difficulty for X
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    x: Difficulty,

    /// Difficulty for O
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    o: Difficulty,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print each game's JSON record
    #[arg(long)]
    record: bool,
}

#[derive(Debug, Default)]
struct Tally {
    x: u32,
    o: u32,
    ties: u32,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    // Fail early on a bad size instead of once per move
    validate_size(args.size)?;

    let mut tally = Tally::default();
    for game in 1..=args.games {
        let mut x = AIEngine::with_config(EngineConfig {
            ai_player: Player::X,
            seed: config.seed.map(|s| s.wrapping_add(2 * u64::from(game))),
            ..config.clone()
        });
        let mut o = AIEngine::with_config(EngineConfig {
            ai_player: Player::O,
            seed: config.seed.map(|s| s.wrapping_add(2 * u64::from(game) + 1)),
            ..config.clone()
        });

        let (board, moves, result) = play_game(&mut x, &mut o, args)?;
        match result {
            GameResult::Winner(Player::X) => tally.x += 1,
            GameResult::Winner(Player::O) => tally.o += 1,
            _ => tally.ties += 1,
        }

        println!("game {game}: {result} after {} moves", moves.len());
        print!("{board}");
        if args.record {
            println!("{}", serialize_board_state(&board, &moves)?);
        }
    }

    info!(
        "X ({}) vs O ({}) on {}x{}",
        args.x, args.o, args.size, args.size
    );
    println!(
        "X wins: {}  O wins: {}  ties: {}",
        tally.x, tally.o, tally.ties
    );
    Ok(())
}

fn play_game(
    x: &mut AIEngine,
    o: &mut AIEngine,
    args: &Args,
) -> Result<(Board, Vec<Move>, GameResult), tictactoe::EngineError> {
    let mut board = Board::new(args.size)?;
    let mut moves = Vec::new();
    let mut player = Player::X;

    loop {
        let result = check_winner(&board);
        if result.is_over() {
            return Ok((board, moves, result));
        }

        let (engine, difficulty) = match player {
            Player::X => (&mut *x, args.x),
            Player::O => (&mut *o, args.o),
        };
        let Some(pos) = engine.get_ai_move(board.cells(), difficulty, args.size) else {
            return Ok((board, moves, result));
        };
        board = board.make_move(pos, player)?;
        moves.push(Move::new(pos, player));
        player = player.opponent();
    }
}
