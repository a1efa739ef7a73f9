//! Property tests over positions reachable by legal play.

use proptest::prelude::*;

use infinite_ttt::board::Mark;
use infinite_ttt::constants::MAX_MARKS;
use infinite_ttt::position::Position;
use infinite_ttt::search::{SearchConfig, analyze, best_move};

/// Replay choices as placements, alternating X then O. Each choice picks
/// among the currently empty cells, so every sequence is legal.
fn reach(choices: &[usize]) -> (Position, Mark) {
    let mut pos = Position::new();
    let mut mark = Mark::X;
    for &choice in choices {
        let empties: Vec<usize> = pos.board().empty_cells().collect();
        let idx = empties[choice % empties.len()];
        let _ = pos.apply(idx, mark).unwrap();
        mark = mark.opponent();
    }
    (pos, mark)
}

fn choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..9, 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reachable_positions_are_consistent(seq in choices()) {
        let (pos, _) = reach(&seq);
        prop_assert!(pos.validate().is_ok());
        prop_assert!(pos.queue(Mark::X).len() <= MAX_MARKS);
        prop_assert!(pos.queue(Mark::O).len() <= MAX_MARKS);
        prop_assert_eq!(
            pos.occupied(),
            pos.board().count(Mark::X) + pos.board().count(Mark::O)
        );
    }

    #[test]
    fn apply_then_undo_is_identity(seq in choices(), x_moves in any::<bool>()) {
        let (mut pos, _) = reach(&seq);
        let before = pos;
        let mark = if x_moves { Mark::X } else { Mark::O };
        let empties: Vec<usize> = pos.board().empty_cells().collect();
        for idx in empties {
            let undo = pos.apply(idx, mark).unwrap();
            prop_assert_eq!(undo.evicted.is_some(), before.queue(mark).is_full());
            prop_assert!(pos.validate().is_ok());
            pos.undo(undo);
            prop_assert_eq!(pos, before);
        }
    }

    #[test]
    fn search_is_pure_and_picks_first_best(seq in choices()) {
        let (pos, to_move) = reach(&seq);
        let before = pos;
        let config = SearchConfig::with_depth(2).unwrap();

        let analysis = analyze(&pos, to_move, &config);
        prop_assert_eq!(pos, before);
        prop_assert_eq!(best_move(&pos, to_move, &config), analysis.best);

        let best = analysis.best.expect("board never fills");
        prop_assert!(pos.board().is_empty_at(best));
        let top = analysis.candidates.iter().map(|c| c.score).max().unwrap();
        let first = analysis.candidates.iter().find(|c| c.score == top).unwrap();
        prop_assert_eq!(first.index, best);
    }
}
