//! Infinite-TTT: a minimax engine for tic-tac-toe with vanishing marks.
//!
//! Each player keeps at most three marks on the board. Placing a fourth
//! removes that player's oldest mark, so games do not end in a full board
//! and the state includes the order in which marks were placed.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`board`] - Marks, cells and the 3x3 grid
//! - [`queue`] - Bounded per-player placement history
//! - [`position`] - Board plus queues, apply/undo with eviction
//! - [`rules`] - Three-in-a-row detection
//! - [`search`] - Depth-bounded minimax without pruning
//! - [`wire`] - JSON move requests and responses
//! - [`protocol`] - Text protocol for front-ends
//! - [`selfplay`] - Full-game simulation
//!
//! ## Example
//!
//! ```
//! use infinite_ttt::board::Mark;
//! use infinite_ttt::position::Position;
//! use infinite_ttt::search::{SearchConfig, best_move};
//!
//! // O to move with X threatening the top row.
//! let pos = Position::from_parts("XX.O.....".parse().unwrap(), &[0, 1], &[3]).unwrap();
//! let best = best_move(&pos, Mark::O, &SearchConfig::default());
//! assert_eq!(best, Some(2));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod position;
pub mod protocol;
pub mod queue;
pub mod rules;
pub mod search;
pub mod selfplay;
pub mod wire;

pub use error::{EngineError, Result};
