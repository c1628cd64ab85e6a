//! Ordered collection of ready/blocked process references. `spec.md` §4.2:
//! insertion-order FIFO for Round-Robin, deterministic removal by identity,
//! and comparator-driven sort for the Round-Robin merge step. Not a
//! priority queue — SJF/SJFP do a full linear scan at selection time.

use std::collections::VecDeque;

use crate::model::ProcessId;

/// Mirrors the teacher's `VecDeque<u32>`-per-queue design
/// (`crates/27-process-scheduler`) generalised to hold arena identities
/// instead of raw pids.
#[derive(Debug, Default, Clone)]
pub struct ProcessQueue {
    items: VecDeque<ProcessId>,
}

impl ProcessQueue {
    pub fn new() -> Self {
        ProcessQueue::default()
    }

    /// O(1) insertion at the tail.
    pub fn append(&mut self, id: ProcessId) {
        self.items.push_back(id);
    }

    /// Removes the first element whose identity equals `id`. O(n); since
    /// identity is the arena index there is at most one match.
    pub fn remove_by_identity(&mut self, id: ProcessId) -> bool {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn front(&self) -> Option<ProcessId> {
        self.items.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<ProcessId> {
        self.items.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.items.iter().copied()
    }

    /// Stable reorder in-place by a derived key.
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(ProcessId) -> K,
    {
        let mut items: Vec<ProcessId> = self.items.drain(..).collect();
        items.sort_by_key(|&id| key(id));
        self.items = items.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> ProcessId {
        ProcessId(n)
    }

    #[test]
    fn append_is_fifo() {
        let mut q = ProcessQueue::new();
        q.append(id(1));
        q.append(id(2));
        assert_eq!(q.front(), Some(id(1)));
        assert_eq!(q.pop_front(), Some(id(1)));
        assert_eq!(q.pop_front(), Some(id(2)));
        assert_eq!(q.pop_front(), None);
    }

    #[test]
    fn remove_by_identity_removes_first_match_only() {
        let mut q = ProcessQueue::new();
        q.append(id(1));
        q.append(id(2));
        q.append(id(3));
        assert!(q.remove_by_identity(id(2)));
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![id(1), id(3)]);
        assert!(!q.remove_by_identity(id(2)));
    }

    #[test]
    fn sort_by_key_is_stable_and_in_place() {
        let mut q = ProcessQueue::new();
        q.append(id(3));
        q.append(id(1));
        q.append(id(2));
        let keys = [3u32, 1, 2];
        q.sort_by_key(|pid| keys[pid.0 - 1]);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn is_empty_and_len_track_contents() {
        let mut q = ProcessQueue::new();
        assert!(q.is_empty());
        q.append(id(1));
        assert!(!q.is_empty());
        assert_eq!(q.len(), 1);
    }
}
