//! Min-priority queue keyed by any totally ordered key.
//!
//! Prim keys entries by edge weight (`i64`), Dijkstra by path length
//! ([`Distance`](crate::Distance)).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Queue that always yields the item with the smallest key first.
pub trait MinPriorityQueue<T, K = i64>
where
    K: Ord + Copy,
{
    fn push(&mut self, item: T, key: K);

    /// Removes the item with the smallest key, returning it with its key.
    fn pop_min(&mut self) -> Option<(T, K)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entry in the binary heap. Ties on `key` are broken by insertion order.
#[derive(Debug)]
struct QueueEntry<T, K> {
    key: K,
    seq: u64,
    item: T,
}

impl<T, K: Ord> PartialEq for QueueEntry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<T, K: Ord> Eq for QueueEntry<T, K> {}

impl<T, K: Ord> Ord for QueueEntry<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (lower key = higher priority)
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T, K: Ord> PartialOrd for QueueEntry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// [`MinPriorityQueue`] backed by `std::collections::BinaryHeap`.
#[derive(Debug)]
pub struct BinaryHeapQueue<T, K = i64> {
    heap: BinaryHeap<QueueEntry<T, K>>,
    next_seq: u64,
}

impl<T, K: Ord + Copy> BinaryHeapQueue<T, K> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Smallest key currently queued.
    #[must_use]
    pub fn peek_key(&self) -> Option<K> {
        self.heap.peek().map(|entry| entry.key)
    }
}

impl<T, K: Ord + Copy> Default for BinaryHeapQueue<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord + Copy> MinPriorityQueue<T, K> for BinaryHeapQueue<T, K> {
    fn push(&mut self, item: T, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueEntry { key, seq, item });
    }

    fn pop_min(&mut self) -> Option<(T, K)> {
        self.heap.pop().map(|entry| (entry.item, entry.key))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_key_order() {
        let mut queue = BinaryHeapQueue::new();
        queue.push('c', 3);
        queue.push('a', -1);
        queue.push('b', 2);

        assert_eq!(queue.peek_key(), Some(-1));
        assert_eq!(queue.pop_min(), Some(('a', -1)));
        assert_eq!(queue.pop_min(), Some(('b', 2)));
        assert_eq!(queue.pop_min(), Some(('c', 3)));
        assert_eq!(queue.pop_min(), None);
    }

    #[test]
    fn test_equal_keys_are_fifo() {
        let mut queue = BinaryHeapQueue::with_capacity(4);
        queue.push(10, 5);
        queue.push(11, 5);
        queue.push(12, 5);

        assert_eq!(queue.pop_min().map(|(item, _)| item), Some(10));
        assert_eq!(queue.pop_min().map(|(item, _)| item), Some(11));
        assert_eq!(queue.pop_min().map(|(item, _)| item), Some(12));
    }

    #[test]
    fn test_len_and_empty() {
        let mut queue: BinaryHeapQueue<usize> = BinaryHeapQueue::default();
        assert!(queue.is_empty());
        queue.push(1, 0);
        queue.push(1, 0);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_wide_keys_order_past_i64() {
        let mut queue: BinaryHeapQueue<&str, i128> = BinaryHeapQueue::new();
        let beyond = i128::from(i64::MAX) + 1;
        queue.push("far", beyond);
        queue.push("near", i128::from(i64::MAX));

        assert_eq!(queue.pop_min(), Some(("near", i128::from(i64::MAX))));
        assert_eq!(queue.pop_min(), Some(("far", beyond)));
    }
}
