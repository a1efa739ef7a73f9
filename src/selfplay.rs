//! Full-game simulation.
//!
//! Plays the engine against a seeded random opponent, or against itself,
//! until someone completes a line or the turn limit is reached. Because the
//! board never fills there is no natural end to a drawn game, so the limit
//! is what stops it.

use crate::board::Mark;
use crate::position::Position;
use crate::search::{SearchConfig, best_move};

/// Default number of placements before a game is abandoned.
pub const DEFAULT_MAX_TURNS: usize = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opponent {
    /// Uniformly random empty cell.
    Random,
    /// The same engine, playing the other mark.
    Engine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub mark: Mark,
    pub index: usize,
    pub evicted: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<PlayedMove>,
    pub winner: Option<Mark>,
    pub final_position: Position,
}

/// Aggregate results over several games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub unfinished: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.engine_wins + self.opponent_wins + self.unfinished
    }
}

/// Pick a uniformly random empty cell.
fn random_move(rng: &mut fastrand::Rng, pos: &Position) -> Option<usize> {
    let empties: Vec<usize> = pos.board().empty_cells().collect();
    if empties.is_empty() {
        None
    } else {
        Some(empties[rng.usize(..empties.len())])
    }
}

/// Play one game. `X` moves first.
pub fn play_game(
    rng: &mut fastrand::Rng,
    engine: Mark,
    opponent: Opponent,
    config: &SearchConfig,
    max_turns: usize,
) -> GameRecord {
    let mut pos = Position::new();
    let mut moves = Vec::new();
    let mut mover = Mark::X;

    while moves.len() < max_turns && pos.winner().is_none() {
        let choice = if mover == engine || opponent == Opponent::Engine {
            best_move(&pos, mover, config)
        } else {
            random_move(rng, &pos)
        };
        let Some(index) = choice else {
            break;
        };
        let evicted = pos.apply_unchecked(index, mover).evicted;
        moves.push(PlayedMove {
            mark: mover,
            index,
            evicted,
        });
        mover = mover.opponent();
    }

    GameRecord {
        winner: pos.winner(),
        moves,
        final_position: pos,
    }
}

/// Play `games` games with alternating engine marks.
pub fn run_matches(
    seed: u64,
    games: usize,
    opponent: Opponent,
    config: &SearchConfig,
    max_turns: usize,
) -> Tally {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tally = Tally::default();
    for game in 0..games {
        let engine = if game % 2 == 0 { Mark::O } else { Mark::X };
        let record = play_game(&mut rng, engine, opponent, config, max_turns);
        match record.winner {
            Some(mark) if mark == engine => tally.engine_wins += 1,
            Some(_) => tally.opponent_wins += 1,
            None => tally.unfinished += 1,
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shallow() -> SearchConfig {
        SearchConfig::with_depth(2).unwrap()
    }

    #[test]
    fn test_invariants_hold_through_game() {
        let mut rng = fastrand::Rng::with_seed(7);
        let record = play_game(&mut rng, Mark::O, Opponent::Random, &shallow(), 30);
        record.final_position.validate().unwrap();
        assert!(record.final_position.occupied() <= 6);
        assert!(record.moves.len() <= 30);
    }

    #[test]
    fn test_moves_alternate_and_start_with_x() {
        let mut rng = fastrand::Rng::with_seed(11);
        let record = play_game(&mut rng, Mark::O, Opponent::Random, &shallow(), 12);
        for (i, mv) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Mark::X } else { Mark::O };
            assert_eq!(mv.mark, expected);
        }
    }

    #[test]
    fn test_evictions_start_on_fourth_placement() {
        let mut rng = fastrand::Rng::with_seed(3);
        let record = play_game(&mut rng, Mark::O, Opponent::Random, &shallow(), 20);
        for (i, mv) in record.moves.iter().enumerate() {
            // Each side's first three placements never evict.
            if i < 6 {
                assert_eq!(mv.evicted, None);
            }
        }
    }

    #[test]
    fn test_game_stops_at_win() {
        let mut rng = fastrand::Rng::with_seed(5);
        let record = play_game(&mut rng, Mark::O, Opponent::Random, &shallow(), 200);
        if let Some(winner) = record.winner {
            assert_eq!(record.moves.last().unwrap().mark, winner);
        } else {
            assert_eq!(record.moves.len(), 200);
        }
    }

    #[test]
    fn test_same_seed_same_tally() {
        let a = run_matches(42, 4, Opponent::Random, &shallow(), 20);
        let b = run_matches(42, 4, Opponent::Random, &shallow(), 20);
        assert_eq!(a, b);
        assert_eq!(a.games(), 4);
    }

    #[test]
    fn test_engine_self_play_is_deterministic() {
        let mut rng = fastrand::Rng::with_seed(0);
        let first = play_game(&mut rng, Mark::O, Opponent::Engine, &shallow(), 16);
        let second = play_game(&mut rng, Mark::O, Opponent::Engine, &shallow(), 16);
        assert_eq!(first.moves, second.moves);
    }
}
