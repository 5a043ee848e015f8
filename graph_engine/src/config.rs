//! Configuration for the graph engine.

/// Configuration for `Graph` runtime behavior.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Vertex count at which Floyd-Warshall relaxes rows in parallel.
    pub parallel_threshold: usize,
    /// Initial capacity reserved for each adjacency sequence.
    pub edge_capacity_hint: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 128,
            edge_capacity_hint: 0,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    #[must_use]
    pub const fn edge_capacity_hint(mut self, capacity: usize) -> Self {
        self.edge_capacity_hint = capacity;
        self
    }
}
