//! Game position and move execution.
//!
//! A `Position` is the board plus one bounded move queue per player. The
//! queues record placement order, so a player's fourth placement evicts the
//! mark at the front of their queue.
//!
//! Moves are applied in place and undone explicitly. `apply` returns an
//! [`Undo`] record holding everything needed to restore the prior state,
//! including the evicted cell. `scoped` wraps the pair in a guard that
//! undoes on drop, which is what the search uses.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Mark};
use crate::constants::{BOARD_CELLS, MAX_MARKS};
use crate::error::{EngineError, Result};
use crate::queue::MoveQueue;
use crate::rules;

/// Record of one applied move, consumed by [`Position::undo`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use = "a move that is never undone leaves the position changed"]
pub struct Undo {
    pub index: usize,
    pub mark: Mark,
    /// Cell emptied by FIFO eviction, if the mover's queue was full.
    pub evicted: Option<usize>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    /// Indexed by `Mark::slot`.
    queues: [MoveQueue; 2],
}

impl Position {
    /// Empty board, empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a position from a board and both queues (oldest first).
    ///
    /// Fails unless every queue entry is an in-range, distinct cell holding
    /// that player's mark and every marked cell appears in its owner's queue.
    pub fn from_parts(board: Board, x_queue: &[usize], o_queue: &[usize]) -> Result<Self> {
        let mut queues = [MoveQueue::new(); 2];
        for (mark, entries) in [(Mark::X, x_queue), (Mark::O, o_queue)] {
            queues[mark.slot()] = validate_queue(&board, mark, entries)?;
        }
        Ok(Self { board, queues })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn queue(&self, mark: Mark) -> &MoveQueue {
        &self.queues[mark.slot()]
    }

    pub fn winner(&self) -> Option<Mark> {
        rules::winner(&self.board)
    }

    /// Number of marks on the board; always the sum of both queue lengths.
    pub fn occupied(&self) -> usize {
        self.queues.iter().map(MoveQueue::len).sum()
    }

    /// Place `mark` at `index`, evicting that player's oldest mark if they
    /// already have three on the board.
    pub fn apply(&mut self, index: usize, mark: Mark) -> Result<Undo> {
        if index >= BOARD_CELLS {
            return Err(EngineError::InvalidCell {
                index: index as i64,
            });
        }
        if !self.board.is_empty_at(index) {
            return Err(EngineError::CellOccupied { index });
        }
        Ok(self.apply_unchecked(index, mark))
    }

    /// `apply` without the bounds and emptiness checks.
    pub(crate) fn apply_unchecked(&mut self, index: usize, mark: Mark) -> Undo {
        debug_assert!(self.board.is_empty_at(index));
        let queue = &mut self.queues[mark.slot()];
        let evicted = if queue.is_full() {
            queue.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            self.board.set(old, None);
        }
        queue.push_back(index);
        self.board.set(index, Some(mark));
        Undo {
            index,
            mark,
            evicted,
        }
    }

    /// Exact inverse of the `apply` that produced `undo`. Undo records must
    /// be consumed in reverse order of application.
    pub fn undo(&mut self, undo: Undo) {
        let queue = &mut self.queues[undo.mark.slot()];
        let popped = queue.pop_back();
        debug_assert_eq!(popped, Some(undo.index));
        self.board.set(undo.index, None);
        if let Some(old) = undo.evicted {
            queue.push_front(old);
            self.board.set(old, Some(undo.mark));
        }
    }

    /// Apply a move and return a guard that undoes it when dropped.
    pub fn scoped(&mut self, index: usize, mark: Mark) -> Result<MoveGuard<'_>> {
        let undo = self.apply(index, mark)?;
        Ok(MoveGuard {
            pos: self,
            undo: Some(undo),
        })
    }

    pub(crate) fn scoped_unchecked(&mut self, index: usize, mark: Mark) -> MoveGuard<'_> {
        let undo = self.apply_unchecked(index, mark);
        MoveGuard {
            pos: self,
            undo: Some(undo),
        }
    }

    /// Run `f` on the position with a move applied, then restore it.
    pub fn with_move<R>(
        &mut self,
        index: usize,
        mark: Mark,
        f: impl FnOnce(&mut Position) -> R,
    ) -> Result<R> {
        let mut guard = self.scoped(index, mark)?;
        Ok(f(&mut *guard))
    }

    /// Re-run the constructor checks on the current state.
    pub fn validate(&self) -> Result<()> {
        Self::from_parts(
            self.board,
            &self.queue(Mark::X).to_vec(),
            &self.queue(Mark::O).to_vec(),
        )
        .map(|_| ())
    }
}

fn validate_queue(board: &Board, mark: Mark, entries: &[usize]) -> Result<MoveQueue> {
    if entries.len() > MAX_MARKS {
        return Err(EngineError::QueueOverflow {
            mark,
            len: entries.len(),
        });
    }
    for (i, &idx) in entries.iter().enumerate() {
        if idx >= BOARD_CELLS {
            return Err(EngineError::InvalidQueueIndex {
                mark,
                index: idx as i64,
            });
        }
        if board.get(idx) != Some(mark) || entries[..i].contains(&idx) {
            return Err(EngineError::QueueBoardMismatch { mark, index: idx });
        }
    }
    let stray = (0..BOARD_CELLS).find(|&i| board.get(i) == Some(mark) && !entries.contains(&i));
    if let Some(index) = stray {
        return Err(EngineError::QueueBoardMismatch { mark, index });
    }
    Ok(MoveQueue::from_indices(entries))
}

/// A move that is undone when the guard goes out of scope, including on
/// early return or unwind.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    undo: Option<Undo>,
}

impl MoveGuard<'_> {
    pub fn evicted(&self) -> Option<usize> {
        self.undo.and_then(|u| u.evicted)
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.undo(undo);
        }
    }
}
