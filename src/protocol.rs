//! Line-oriented text protocol for driving the engine from a front-end.
//!
//! The framing follows GTP: each command may start with a numeric id, and
//! each response is `=[id] text` on success or `?[id] message` on failure,
//! followed by a blank line. Lines starting with `#` are ignored.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Reset to an empty board
//! - `depth [n]` - Show or set the depth cutoff
//! - `play <mark> <index>` - Place a mark, evicting that side's oldest if needed
//! - `genmove <mark>` - Let the engine choose and play a move
//! - `showboard` - Print the board
//! - `queues` - Print both move queues, oldest first
//! - `winner` - Print the winning mark, or `none`
//! - `suggest <json>` - Answer a one-shot JSON move request
//!
//! ## Example
//!
//! ```ignore
//! use infinite_ttt::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::board::Mark;
use crate::constants::BOARD_CELLS;
use crate::error::{EngineError, Result};
use crate::position::Position;
use crate::search::{SearchConfig, TracingObserver, analyze_with};
use crate::wire::{MoveRequest, suggest};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "queues",
    "quit",
    "showboard",
    "suggest",
    "version",
    "winner",
];

/// Protocol session state.
pub struct ProtocolEngine {
    /// Current game position
    pos: Position,
    /// Search parameters used by `genmove` and `suggest`
    config: SearchConfig,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            pos: Position::new(),
            config,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let (command, rest) = match command_line.split_once(char::is_whitespace) {
                Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
                None => (command_line.to_lowercase(), ""),
            };
            let result = if command.is_empty() {
                Err(CommandError::MissingCommand)
            } else {
                self.execute(&command, rest)
            };

            let (success, message) = match result {
                Ok(message) => (true, message),
                Err(err) => {
                    warn!(%command, error = %err, "command failed");
                    (false, err.to_string())
                }
            };
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command. `rest` is everything after the command word.
    fn execute(&mut self, command: &str, rest: &str) -> std::result::Result<String, CommandError> {
        let args: Vec<&str> = rest.split_whitespace().collect();
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(CommandError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "clear_board" => {
                self.pos = Position::new();
                debug!("board cleared");
                Ok(String::new())
            }

            "depth" => match args.first() {
                None => Ok(self.config.depth_cutoff.to_string()),
                Some(arg) => {
                    let depth = arg
                        .parse::<u32>()
                        .map_err(|_| EngineError::InvalidDepth(arg.to_string()))?;
                    self.config = SearchConfig::with_depth(depth)?;
                    info!(depth, "depth cutoff changed");
                    Ok(String::new())
                }
            },

            "play" => {
                let [mark, vertex] = args.as_slice() else {
                    return Err(CommandError::MissingArgument);
                };
                let mark: Mark = mark.parse()?;
                let index = parse_index(vertex)?;
                self.ensure_in_progress()?;
                let undo = self.pos.apply(index, mark)?;
                debug!(%mark, index, evicted = ?undo.evicted, "move played");
                Ok(String::new())
            }

            "genmove" => {
                let mark: Mark = args.first().ok_or(CommandError::MissingArgument)?.parse()?;
                self.ensure_in_progress()?;

                let start = Instant::now();
                let analysis = analyze_with(&self.pos, mark, &self.config, &mut TracingObserver);
                info!(
                    %mark,
                    index = analysis.move_index(),
                    nodes = analysis.nodes,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "generated move"
                );

                match analysis.best {
                    Some(index) => {
                        let _ = self.pos.apply(index, mark)?;
                        Ok(index.to_string())
                    }
                    None => Ok("none".to_string()),
                }
            }

            "showboard" => Ok(format!("\n{}", self.pos.board())),

            "queues" => Ok(format!(
                "X {:?} O {:?}",
                self.pos.queue(Mark::X),
                self.pos.queue(Mark::O)
            )),

            "winner" => Ok(self
                .pos
                .winner()
                .map_or_else(|| "none".to_string(), |m| m.to_string())),

            "suggest" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument);
                }
                let request = MoveRequest::from_json(rest)?;
                let response = suggest(&request, &self.config, &mut TracingObserver)?;
                Ok(serde_json::to_string(&response).map_err(EngineError::from)?)
            }

            _ => Err(CommandError::Unknown(command.to_string())),
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.pos.winner() {
            Some(_) => Err(EngineError::GameOver),
            None => Ok(()),
        }
    }
}

fn parse_index(arg: &str) -> std::result::Result<usize, CommandError> {
    match arg.parse::<i64>() {
        Ok(i) if (0..BOARD_CELLS as i64).contains(&i) => Ok(i as usize),
        Ok(i) => Err(EngineError::InvalidCell { index: i }.into()),
        Err(_) => Err(CommandError::InvalidArgument(arg.to_string())),
    }
}

/// Failure of a single protocol command.
#[derive(thiserror::Error, Debug)]
enum CommandError {
    #[error("missing command")]
    MissingCommand,

    #[error("missing argument")]
    MissingArgument,

    #[error("invalid argument '{0}'")]
    InvalidArgument(String),

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
