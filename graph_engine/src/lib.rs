//! Weighted graph engine and its family of classical algorithms.
//!
//! A [`Graph`] has a fixed number of vertices `0..n`, is either directed or
//! undirected, and is mutated only by inserting weighted edges. Adjacency
//! lives behind a single readers-writer lock: any number of algorithms may
//! read the same graph concurrently while edge insertion takes exclusive
//! access.
//!
//! Every algorithm runs against one consistent read view, allocates its own
//! working state, and returns an owned result:
//! - traversal: BFS, DFS, reachability, connected components
//! - shortest paths: Dijkstra, Bellman-Ford, Floyd-Warshall
//! - minimum spanning trees: Kruskal, Prim
//! - connectivity: articulation points, bridges, strongly connected
//!   components (Kosaraju and Tarjan), topological sort
//! - path existence: Euler and Hamiltonian paths and circuits
//!
//! [`analysis::Analysis`] wraps any algorithm into a reusable instance that
//! keeps its last result behind an instance-level lock.

// Pedantic lint configuration for graph_engine
#![allow(clippy::missing_errors_doc)] // Error conditions are self-evident from Result types
#![allow(clippy::missing_panics_doc)] // Collaborator indices are validated by callers
#![allow(clippy::must_use_candidate)]

use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

mod algorithms;
pub mod analysis;
pub mod collections;
mod config;
mod error;

pub use algorithms::{
    AllPairsShortestPaths, BellmanFordResult, BiconnectedResult, ComponentsResult, EulerStatus,
    HamiltonianConfig, HamiltonianResult, MstEdge, MstResult, PrimConfig, PrimItem, SccConfig,
    SccResult, ShortestPaths, TopologicalOrder,
};
pub use config::GraphConfig;
pub use error::{GraphError, GraphKind, Result};

/// Vertex identifier, an index in `[0, vertex_count)`.
pub type VertexId = usize;

/// Identifier of a logical edge: its insertion index.
pub type EdgeId = usize;

/// Sum of edge weights along a path or tree.
///
/// Edge weights are `i64`; sums are widened so that no sum over fewer than
/// `2^63` edges can overflow.
pub type Distance = i128;

/// One adjacency record.
///
/// For undirected graphs both records of a logical edge share the same `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub weight: i64,
}

impl Edge {
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// The same edge seen from its other endpoint.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            id: self.id,
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }
}

/// Adjacency storage guarded by the graph lock.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    /// Outgoing records per vertex, in insertion order.
    lists: Vec<Vec<Edge>>,
    /// Every logical edge once, in insertion order.
    edges: Vec<Edge>,
}

/// Weighted graph with a fixed vertex set.
pub struct Graph {
    vertex_count: usize,
    directed: bool,
    config: GraphConfig,
    adjacency: RwLock<Adjacency>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge_count = self.adjacency.read().edges.len();
        f.debug_struct("Graph")
            .field("vertex_count", &self.vertex_count)
            .field("directed", &self.directed)
            .field("edge_count", &edge_count)
            .finish_non_exhaustive()
    }
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        Self {
            vertex_count: self.vertex_count,
            directed: self.directed,
            config: self.config.clone(),
            adjacency: RwLock::new(self.adjacency.read().clone()),
        }
    }
}

impl Graph {
    #[must_use]
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Self::with_config(vertex_count, directed, GraphConfig::default())
    }

    #[must_use]
    pub fn directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true)
    }

    #[must_use]
    pub fn undirected(vertex_count: usize) -> Self {
        Self::new(vertex_count, false)
    }

    #[must_use]
    pub fn with_config(vertex_count: usize, directed: bool, config: GraphConfig) -> Self {
        let lists = (0..vertex_count)
            .map(|_| Vec::with_capacity(config.edge_capacity_hint))
            .collect();
        Self {
            vertex_count,
            directed,
            config,
            adjacency: RwLock::new(Adjacency {
                lists,
                edges: Vec::new(),
            }),
        }
    }

    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    pub const fn kind(&self) -> GraphKind {
        GraphKind::of(self.directed)
    }

    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of logical edges inserted so far.
    pub fn edge_count(&self) -> usize {
        self.adjacency.read().edges.len()
    }

    /// Fails with [`GraphError::InvalidVertex`] unless `v < vertex_count`.
    pub const fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v < self.vertex_count {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                vertex: v,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Inserts the edge `from -> to`, mirrored as `to -> from` when undirected.
    #[instrument(skip(self))]
    pub fn add_edge(&self, from: VertexId, to: VertexId, weight: i64) -> Result<EdgeId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let mut adjacency = self.adjacency.write();
        Ok(self.insert_edge(&mut adjacency, from, to, weight))
    }

    /// Inserts a batch of `(from, to, weight)` edges under one write lock.
    ///
    /// Every endpoint is validated before anything is inserted, so a batch
    /// containing an invalid vertex leaves the graph unchanged.
    #[instrument(skip(self, edges))]
    pub fn add_edges<I>(&self, edges: I) -> Result<Vec<EdgeId>>
    where
        I: IntoIterator<Item = (VertexId, VertexId, i64)>,
    {
        let edges: Vec<_> = edges.into_iter().collect();
        for &(from, to, _) in &edges {
            self.check_vertex(from)?;
            self.check_vertex(to)?;
        }

        let mut adjacency = self.adjacency.write();
        let ids = edges
            .into_iter()
            .map(|(from, to, weight)| self.insert_edge(&mut adjacency, from, to, weight))
            .collect::<Vec<_>>();
        debug!(inserted = ids.len(), "batch edge insertion");
        Ok(ids)
    }

    fn insert_edge(
        &self,
        adjacency: &mut Adjacency,
        from: VertexId,
        to: VertexId,
        weight: i64,
    ) -> EdgeId {
        let id = adjacency.edges.len();
        let edge = Edge {
            id,
            from,
            to,
            weight,
        };
        adjacency.edges.push(edge);
        adjacency.lists[from].push(edge);
        if !self.directed && from != to {
            adjacency.lists[to].push(edge.reversed());
        }
        id
    }

    /// Adjacent vertex ids of `v` in insertion order.
    pub fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>> {
        self.check_vertex(v)?;
        Ok(self.adjacency.read().lists[v].iter().map(|e| e.to).collect())
    }

    /// Outgoing adjacency records of `v` in insertion order.
    pub fn edges_from(&self, v: VertexId) -> Result<Vec<Edge>> {
        self.check_vertex(v)?;
        Ok(self.adjacency.read().lists[v].clone())
    }

    /// Every logical edge once, in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        self.adjacency.read().edges.clone()
    }

    pub fn out_degree(&self, v: VertexId) -> Result<usize> {
        self.check_vertex(v)?;
        Ok(self.read().out_degree(v))
    }

    pub fn in_degree(&self, v: VertexId) -> Result<usize> {
        self.check_vertex(v)?;
        Ok(self.read().in_degree(v))
    }

    /// Edge endpoints incident to `v`; an undirected self-loop counts twice.
    pub fn degree(&self, v: VertexId) -> Result<usize> {
        self.check_vertex(v)?;
        Ok(self.read().degree(v))
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        Ok(self.weight(from, to)?.is_some())
    }

    /// Weight of the lightest edge `from -> to`, if any.
    pub fn weight(&self, from: VertexId, to: VertexId) -> Result<Option<i64>> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        Ok(self.adjacency.read().lists[from]
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min())
    }

    /// Builds the graph with every edge reversed.
    pub fn transpose(&self) -> Result<Self> {
        if !self.directed {
            return Err(GraphError::Unsupported {
                algorithm: "transpose",
                requires: GraphKind::Directed,
            });
        }
        let transposed = Self::with_config(self.vertex_count, true, self.config.clone());
        {
            let source = self.adjacency.read();
            let mut target = transposed.adjacency.write();
            for edge in &source.edges {
                transposed.insert_edge(&mut target, edge.to, edge.from, edge.weight);
            }
        }
        Ok(transposed)
    }

    /// Takes a read view that stays consistent for the whole computation.
    pub(crate) fn read(&self) -> GraphView<'_> {
        GraphView {
            adjacency: self.adjacency.read(),
            vertex_count: self.vertex_count,
            directed: self.directed,
        }
    }

    /// Rejects the call unless the graph has the required shape.
    pub(crate) fn require(&self, algorithm: &'static str, requires: GraphKind) -> Result<()> {
        if self.kind() == requires {
            Ok(())
        } else {
            tracing::warn!(algorithm, %requires, "algorithm invoked on unsupported graph");
            Err(GraphError::Unsupported {
                algorithm,
                requires,
            })
        }
    }
}

/// Read-locked view of a graph used by the algorithms.
pub(crate) struct GraphView<'a> {
    adjacency: RwLockReadGuard<'a, Adjacency>,
    vertex_count: usize,
    directed: bool,
}

impl GraphView<'_> {
    pub(crate) const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub(crate) const fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn edges_from(&self, v: VertexId) -> &[Edge] {
        &self.adjacency.lists[v]
    }

    pub(crate) fn edges(&self) -> &[Edge] {
        &self.adjacency.edges
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.adjacency.edges.len()
    }

    pub(crate) fn out_degree(&self, v: VertexId) -> usize {
        self.adjacency.lists[v].len()
    }

    pub(crate) fn in_degree(&self, v: VertexId) -> usize {
        if self.directed {
            self.adjacency.edges.iter().filter(|e| e.to == v).count()
        } else {
            self.degree(v)
        }
    }

    pub(crate) fn degree(&self, v: VertexId) -> usize {
        let list = &self.adjacency.lists[v];
        if self.directed {
            list.len() + self.in_degree(v)
        } else {
            list.len() + list.iter().filter(|e| e.is_self_loop()).count()
        }
    }
}
