//! Bounded FIFO of board indices, one per player.
//!
//! Entries are stored oldest first in a fixed array. Slots past `len` are
//! always zero so that the derived equality compares only live entries.

use std::fmt;

use crate::constants::MAX_MARKS;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveQueue {
    slots: [u8; MAX_MARKS],
    len: u8,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from indices, oldest first. Callers are expected to
    /// have checked length and range already; see `Position::new`.
    pub(crate) fn from_indices(indices: &[usize]) -> Self {
        debug_assert!(indices.len() <= MAX_MARKS);
        let mut q = Self::new();
        for &idx in indices {
            q.push_back(idx);
        }
        q
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == MAX_MARKS
    }

    /// Oldest entry, the one evicted by the next placement when full.
    pub fn front(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.slots[0] as usize)
    }

    pub fn back(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.slots[self.len() - 1] as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots[..self.len()].iter().map(|&i| i as usize)
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    pub(crate) fn push_back(&mut self, idx: usize) {
        debug_assert!(!self.is_full(), "push onto full queue");
        self.slots[self.len()] = idx as u8;
        self.len += 1;
    }

    pub(crate) fn pop_back(&mut self) -> Option<usize> {
        let last = self.back()?;
        self.len -= 1;
        self.slots[self.len()] = 0;
        Some(last)
    }

    pub(crate) fn pop_front(&mut self) -> Option<usize> {
        let first = self.front()?;
        self.slots.copy_within(1.., 0);
        self.len -= 1;
        self.slots[self.len()] = 0;
        Some(first)
    }

    pub(crate) fn push_front(&mut self, idx: usize) {
        debug_assert!(!self.is_full(), "push onto full queue");
        let len = self.len();
        self.slots.copy_within(..len, 1);
        self.slots[0] = idx as u8;
        self.len += 1;
    }
}

impl fmt::Debug for MoveQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = MoveQueue::new();
        q.push_back(4);
        q.push_back(0);
        q.push_back(8);
        assert!(q.is_full());
        assert_eq!(q.front(), Some(4));
        assert_eq!(q.pop_front(), Some(4));
        assert_eq!(q.to_vec(), vec![0, 8]);
    }

    #[test]
    fn test_push_front_restores_pop_front() {
        let original = MoveQueue::from_indices(&[0, 1, 2]);
        let mut q = original;
        let evicted = q.pop_front().unwrap();
        q.push_back(5);
        assert_eq!(q.to_vec(), vec![1, 2, 5]);

        assert_eq!(q.pop_back(), Some(5));
        q.push_front(evicted);
        assert_eq!(q, original);
    }

    #[test]
    fn test_push_front_shifts_partial_queue() {
        let mut q = MoveQueue::from_indices(&[6, 2]);
        q.push_front(8);
        assert_eq!(q.to_vec(), vec![8, 6, 2]);
        assert_eq!(q.front(), Some(8));
        assert_eq!(q.back(), Some(2));

        let mut empty = MoveQueue::new();
        empty.push_front(4);
        assert_eq!(empty, MoveQueue::from_indices(&[4]));
    }

    #[test]
    fn test_equality_ignores_dead_slots() {
        let mut a = MoveQueue::from_indices(&[7, 3]);
        a.pop_back();
        let b = MoveQueue::from_indices(&[7]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_queue() {
        let mut q = MoveQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.front(), None);
        assert_eq!(q.pop_front(), None);
        assert_eq!(q.pop_back(), None);
        assert_eq!(format!("{q:?}"), "[]");
    }
}
