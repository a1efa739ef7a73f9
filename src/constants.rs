//! Constants for board geometry, queue limits, and search parameters.
//!
//! The board is a plain 3x3 grid stored as a 9-element array in row-major
//! order. Unlike larger boards there is no padding: every index in
//! `0..BOARD_CELLS` is a playable cell.

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the board.
pub const N: usize = 3;

/// Total number of cells on the board.
pub const BOARD_CELLS: usize = N * N;

/// Maximum number of live marks a single player may have on the board.
/// Placing one more evicts that player's oldest mark.
pub const MAX_MARKS: usize = 3;

// =============================================================================
// Special Move Values
// =============================================================================

/// Wire value returned when no move is possible.
pub const NO_MOVE: i32 = -1;

// =============================================================================
// Search Parameters
// =============================================================================

/// Base score for a won position. A win found at depth `d` scores
/// `WIN_SCORE - d`, a loss scores `d - WIN_SCORE`.
pub const WIN_SCORE: i32 = 10;

/// Score of a position truncated by the depth cutoff.
pub const NEUTRAL_SCORE: i32 = 0;

/// Starting value for a maximizing node. Lower than any reachable score.
pub const MAX_SENTINEL: i32 = -1000;

/// Starting value for a minimizing node. Higher than any reachable score.
pub const MIN_SENTINEL: i32 = 1000;

/// Default depth cutoff. Recursion stops once `depth > DEFAULT_DEPTH_CUTOFF`.
pub const DEFAULT_DEPTH_CUTOFF: u32 = 4;

/// Largest cutoff accepted from configuration. Node count grows roughly as
/// 7^depth, so values past this stop being interactive.
pub const MAX_DEPTH_CUTOFF: u32 = 10;

/// Environment variable consulted by the binary for the depth cutoff.
pub const DEPTH_ENV_VAR: &str = "INFINITE_TTT_DEPTH";
