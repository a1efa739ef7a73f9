//! JSON request and response shapes for move suggestions.
//!
//! These mirror what the game front-ends send:
//!
//! ```json
//! {"board": ["X", "X", "", "O", "O", "", "", "", ""], "xQueue": [0, 1], "oQueue": [3, 4]}
//! ```
//!
//! answered with `{"index": 2}`, or `{"index": -1}` when no move exists.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::constants::{BOARD_CELLS, MAX_MARKS};
use crate::error::{EngineError, Result};
use crate::position::Position;
use crate::search::{SearchConfig, SearchObserver, analyze_with};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub board: Vec<String>,
    #[serde(default)]
    pub x_queue: Vec<i64>,
    #[serde(default)]
    pub o_queue: Vec<i64>,
    /// Mark the engine plays. Defaults to `O`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Per-request override of the depth cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub index: i32,
}

impl MoveRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a request from an existing position.
    pub fn from_position(position: &Position, player: Mark) -> Self {
        let board = position
            .board()
            .cells()
            .iter()
            .map(|c| c.map(|m| m.to_string()).unwrap_or_default())
            .collect();
        let queue = |m: Mark| position.queue(m).iter().map(|i| i as i64).collect();
        Self {
            board,
            x_queue: queue(Mark::X),
            o_queue: queue(Mark::O),
            player: Some(player.to_string()),
            depth: None,
        }
    }

    pub fn player(&self) -> Result<Mark> {
        self.player.as_deref().map_or(Ok(Mark::O), str::parse)
    }

    pub fn config(&self, base: &SearchConfig) -> Result<SearchConfig> {
        self.depth.map_or(Ok(*base), SearchConfig::with_depth)
    }

    /// Validate the request into a position.
    pub fn to_position(&self) -> Result<Position> {
        let board = Board::from_symbols(&self.board)?;
        let x_queue = queue_indices(Mark::X, &self.x_queue)?;
        let o_queue = queue_indices(Mark::O, &self.o_queue)?;
        Position::from_parts(board, &x_queue, &o_queue)
    }
}

fn queue_indices(mark: Mark, entries: &[i64]) -> Result<Vec<usize>> {
    if entries.len() > MAX_MARKS {
        return Err(EngineError::QueueOverflow {
            mark,
            len: entries.len(),
        });
    }
    entries
        .iter()
        .map(|&index| match usize::try_from(index) {
            Ok(i) if i < BOARD_CELLS => Ok(i),
            _ => Err(EngineError::InvalidQueueIndex { mark, index }),
        })
        .collect()
}

/// Validate `request` and answer it with the engine's move.
pub fn suggest<O: SearchObserver + ?Sized>(
    request: &MoveRequest,
    base: &SearchConfig,
    observer: &mut O,
) -> Result<MoveResponse> {
    let position = request.to_position()?;
    let player = request.player()?;
    let config = request.config(base)?;
    let analysis = analyze_with(&position, player, &config, observer);
    Ok(MoveResponse {
        index: analysis.move_index(),
    })
}
