//! Disjoint-set forest with path compression and union by rank.

use std::cmp::Ordering;

/// Partition of `0..len` into disjoint sets.
pub trait DisjointSet {
    /// Creates `size` singleton sets.
    fn with_size(size: usize) -> Self
    where
        Self: Sized;

    /// Returns the representative of the set containing `x`.
    fn find(&mut self, x: usize) -> usize;

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` when they were already the same set.
    fn union(&mut self, x: usize, y: usize) -> bool;

    fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets currently tracked.
    fn set_count(&self) -> usize;

    /// Number of elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Array-backed union-find.
///
/// Indices must be `< len()`; out-of-range indices panic.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }
}

impl DisjointSet for UnionFind {
    fn with_size(size: usize) -> Self {
        Self::new(size)
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            Ordering::Less => {
                self.parent[rx] = ry;
            },
            Ordering::Greater => {
                self.parent[ry] = rx;
            },
            Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] = self.rank[rx].saturating_add(1);
            },
        }
        self.sets -= 1;
        true
    }

    fn set_count(&self) -> usize {
        self.sets
    }

    fn len(&self) -> usize {
        self.parent.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.set_count(), 4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
        }
        assert!(!uf.connected(0, 1));
    }

    #[test]
    fn test_union_and_connected() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(uf.connected(0, 1));
        assert!(uf.connected(4, 3));
        assert!(!uf.connected(1, 3));
        assert_eq!(uf.set_count(), 3);

        assert!(uf.union(1, 4));
        assert!(uf.connected(0, 3));
        assert_eq!(uf.set_count(), 2);
    }

    #[test]
    fn test_union_same_set_is_noop() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 1));
        assert!(!uf.union(1, 0));
        assert_eq!(uf.set_count(), 2);
    }

    #[test]
    fn test_path_compression_flattens_chain() {
        let mut uf = UnionFind::new(64);
        for i in 1..64 {
            uf.union(i - 1, i);
        }
        let root = uf.find(63);
        for i in 0..64 {
            uf.find(i);
            assert_eq!(uf.parent[i], root);
        }
    }

    #[test]
    fn test_empty() {
        let uf = UnionFind::with_size(0);
        assert!(uf.is_empty());
        assert_eq!(uf.set_count(), 0);
    }
}
