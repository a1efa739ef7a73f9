//! Infinite-TTT: a minimax engine for tic-tac-toe with vanishing marks.
//!
//! ## Usage
//!
//! - `infinite-ttt` - Show a demo
//! - `infinite-ttt protocol` - Run the text protocol on stdin/stdout
//! - `infinite-ttt suggest --board XX.OO....` - Ask for a single move
//! - `infinite-ttt demo` - Play some self-play games

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use infinite_ttt::board::{Board, Mark};
use infinite_ttt::constants::{DEFAULT_DEPTH_CUTOFF, DEPTH_ENV_VAR};
use infinite_ttt::position::Position;
use infinite_ttt::protocol::ProtocolEngine;
use infinite_ttt::search::{SearchConfig, TracingObserver};
use infinite_ttt::selfplay::{DEFAULT_MAX_TURNS, Opponent, run_matches};
use infinite_ttt::wire::{MoveRequest, suggest};

/// Infinite-TTT: minimax engine for three-mark tic-tac-toe
#[derive(Parser)]
#[command(name = "infinite-ttt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Depth cutoff for the search
    #[arg(long, global = true, env = DEPTH_ENV_VAR, default_value_t = DEFAULT_DEPTH_CUTOFF)]
    depth: u32,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the line-based text protocol on stdin/stdout
    Protocol,
    /// Compute a single move
    Suggest {
        /// Board as 9 cells, e.g. "XX.OO...." ('.' is empty)
        #[arg(long, required_unless_present = "stdin")]
        board: Option<String>,
        /// X's marks, oldest first, e.g. "0,1"
        #[arg(long, value_delimiter = ',')]
        x_queue: Vec<usize>,
        /// O's marks, oldest first
        #[arg(long, value_delimiter = ',')]
        o_queue: Vec<usize>,
        /// Mark the engine plays
        #[arg(long, default_value = "O")]
        player: String,
        /// Read a JSON move request from stdin instead
        #[arg(long)]
        stdin: bool,
        /// Print the JSON response instead of the bare index
        #[arg(long)]
        json: bool,
    },
    /// Play engine games and print a summary
    Demo {
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: usize,
        /// RNG seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Placements before a game is abandoned
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
        /// Who the engine plays against
        #[arg(long, value_enum, default_value_t = OpponentArg::Random)]
        opponent: OpponentArg,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum OpponentArg {
    Random,
    Engine,
}

impl From<OpponentArg> for Opponent {
    fn from(arg: OpponentArg) -> Self {
        match arg {
            OpponentArg::Random => Opponent::Random,
            OpponentArg::Engine => Opponent::Engine,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SearchConfig::with_depth(cli.depth).context("invalid --depth")?;

    match cli.command {
        Some(Commands::Protocol) => {
            info!(depth = config.depth_cutoff, "starting protocol loop");
            ProtocolEngine::with_config(config)
                .run()
                .context("protocol I/O failed")?;
        }
        Some(Commands::Suggest {
            board,
            x_queue,
            o_queue,
            player,
            stdin,
            json,
        }) => {
            let request = if stdin {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read request from stdin")?;
                MoveRequest::from_json(&buf)?
            } else {
                let board: Board = board.as_deref().unwrap_or_default().parse()?;
                let player: Mark = player.parse()?;
                let position = Position::from_parts(board, &x_queue, &o_queue)?;
                MoveRequest::from_position(&position, player)
            };
            let response = suggest(&request, &config, &mut TracingObserver)?;
            if json {
                println!("{}", serde_json::to_string(&response)?);
            } else {
                println!("{}", response.index);
            }
        }
        Some(Commands::Demo {
            games,
            seed,
            max_turns,
            opponent,
        }) => run_demo(&config, games, seed, max_turns, opponent.into()),
        None => run_demo(&config, 4, 1, DEFAULT_MAX_TURNS, Opponent::Random),
    }

    Ok(())
}

fn run_demo(config: &SearchConfig, games: usize, seed: u64, max_turns: usize, opponent: Opponent) {
    println!("Infinite-TTT: minimax with vanishing marks\n");

    let pos = Position::new();
    println!("{}", pos.board());

    println!(
        "Playing {games} games against {:?} opponent (depth {}, seed {seed})...",
        opponent, config.depth_cutoff
    );
    let tally = run_matches(seed, games, opponent, config, max_turns);
    println!("Engine wins:   {}", tally.engine_wins);
    println!("Opponent wins: {}", tally.opponent_wins);
    println!("Unfinished:    {}", tally.unfinished);
}
