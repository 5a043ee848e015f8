//! Minimum spanning trees: Kruskal's and Prim's algorithms.
//!
//! Both are defined for undirected graphs only. When the graph is not
//! connected, Kruskal still returns the maximal spanning forest and Prim the
//! tree of the start vertex's component; `spanning` is false in both cases.
//! Negative weights are valid inputs for both algorithms.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::collections::{BinaryHeapQueue, DisjointSet, MinPriorityQueue, UnionFind};
use crate::{Distance, Edge, EdgeId, Graph, GraphKind, Result, VertexId};

/// Configuration for Prim's algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimConfig {
    /// Vertex the tree is grown from.
    pub start: VertexId,
}

impl PrimConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn start(mut self, start: VertexId) -> Self {
        self.start = start;
        self
    }
}

/// An edge in the MST result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MstEdge {
    pub edge_id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub weight: i64,
}

impl From<Edge> for MstEdge {
    fn from(edge: Edge) -> Self {
        Self {
            edge_id: edge.id,
            from: edge.from,
            to: edge.to,
            weight: edge.weight,
        }
    }
}

/// Result of an MST computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstResult {
    /// Accepted edges in the order they were chosen.
    pub edges: Vec<MstEdge>,
    /// Sum of accepted edge weights, widened so it cannot overflow.
    pub total_weight: Distance,
    /// Number of trees in the forest (connected components covered).
    pub tree_count: usize,
    /// True when the edges form a spanning tree of the whole graph.
    pub spanning: bool,
}

impl MstResult {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0,
            tree_count: 0,
            spanning: false,
        }
    }

    #[must_use]
    pub const fn is_spanning_tree(&self) -> bool {
        self.spanning
    }

    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for MstResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Priority queue item for Prim: the vertex and the edge that reaches it.
pub type PrimItem = (VertexId, Option<(VertexId, EdgeId)>);

impl Graph {
    /// Kruskal's algorithm with the default union-find.
    ///
    /// Time complexity: O(E log E) for sorting edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Unsupported`](crate::GraphError) for directed graphs.
    pub fn kruskal(&self) -> Result<MstResult> {
        self.kruskal_with::<UnionFind>()
    }

    /// Kruskal's algorithm with a caller-chosen disjoint-set structure.
    #[instrument(skip(self))]
    pub fn kruskal_with<D: DisjointSet>(&self) -> Result<MstResult> {
        self.require("kruskal", GraphKind::Undirected)?;
        let view = self.read();
        let n = view.vertex_count();

        // Each logical edge once, oriented from the lower vertex id.
        let mut candidates: Vec<Edge> = view
            .edges()
            .iter()
            .filter(|e| !e.is_self_loop())
            .map(|e| if e.from < e.to { *e } else { e.reversed() })
            .collect();
        candidates.sort_by_key(|e| e.weight);

        let mut sets = D::with_size(n);
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        let mut total_weight: Distance = 0;

        for edge in candidates {
            if sets.union(edge.from, edge.to) {
                edges.push(MstEdge::from(edge));
                total_weight += Distance::from(edge.weight);
                if edges.len() + 1 == n {
                    break;
                }
            }
        }

        let result = MstResult {
            spanning: n > 0 && edges.len() + 1 == n,
            tree_count: sets.set_count(),
            edges,
            total_weight,
        };
        debug!(
            total_weight = result.total_weight,
            trees = result.tree_count,
            "kruskal finished"
        );
        Ok(result)
    }

    /// Prim's algorithm with the default binary heap.
    ///
    /// Time complexity: O(E log E)
    ///
    /// # Errors
    ///
    /// Returns an error for directed graphs or an out-of-range start vertex.
    pub fn prim(&self, config: &PrimConfig) -> Result<MstResult> {
        self.prim_with::<BinaryHeapQueue<PrimItem>>(config)
    }

    /// Prim's algorithm with a caller-chosen priority queue.
    #[instrument(skip(self))]
    pub fn prim_with<Q>(&self, config: &PrimConfig) -> Result<MstResult>
    where
        Q: MinPriorityQueue<PrimItem> + Default,
    {
        self.require("prim", GraphKind::Undirected)?;
        if self.vertex_count() == 0 {
            return Ok(MstResult::empty());
        }
        self.check_vertex(config.start)?;

        let view = self.read();
        let n = view.vertex_count();
        let mut in_tree = vec![false; n];
        let mut reached = 0usize;
        let mut edges = Vec::with_capacity(n - 1);
        let mut total_weight: Distance = 0;
        let mut queue = Q::default();

        queue.push((config.start, None), 0);

        while let Some(((v, via), weight)) = queue.pop_min() {
            if in_tree[v] {
                continue;
            }
            in_tree[v] = true;
            reached += 1;

            if let Some((from, edge_id)) = via {
                edges.push(MstEdge {
                    edge_id,
                    from,
                    to: v,
                    weight,
                });
                total_weight += Distance::from(weight);
            }

            for edge in view.edges_from(v) {
                if !in_tree[edge.to] {
                    queue.push((edge.to, Some((v, edge.id))), edge.weight);
                }
            }
        }

        let result = MstResult {
            edges,
            total_weight,
            tree_count: 1,
            spanning: reached == n,
        };
        debug!(
            total_weight = result.total_weight,
            reached,
            "prim finished"
        );
        Ok(result)
    }
}
