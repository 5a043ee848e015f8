//! Reusable algorithm instances.
//!
//! An [`Analysis`] binds one [`Algorithm`] to one graph and keeps the result
//! of its last computation behind an instance-level lock, so any number of
//! observers can read it after the computation finishes. Every
//! [`Analysis::compute`] allocates fresh working state, which makes
//! concurrent computes on one instance safe; the last one to finish wins.

use std::fmt::Debug;

use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::{
    AllPairsShortestPaths, BellmanFordResult, BiconnectedResult, Graph, GraphError,
    HamiltonianConfig, HamiltonianResult, MstResult, PrimConfig, Result, SccConfig, SccResult,
    ShortestPaths, TopologicalOrder, VertexId,
};

/// A graph algorithm that can be run repeatedly against a graph.
pub trait Algorithm: Debug + Send + Sync {
    /// Result type produced by one run.
    type Output: Clone + Debug + Send + Sync;

    /// Name used in logs.
    const NAME: &'static str;

    /// Run the algorithm against the graph's current edges.
    fn run(&self, graph: &Graph) -> Result<Self::Output>;
}

/// An algorithm bound to a graph, holding its last result.
#[derive(Debug)]
pub struct Analysis<'g, A: Algorithm> {
    graph: &'g Graph,
    algorithm: A,
    last: RwLock<Option<A::Output>>,
}

impl<'g, A: Algorithm> Analysis<'g, A> {
    pub fn new(graph: &'g Graph, algorithm: A) -> Self {
        Self {
            graph,
            algorithm,
            last: RwLock::new(None),
        }
    }

    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub const fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Run the algorithm and remember the result.
    ///
    /// A failed run leaves the previous result in place.
    #[instrument(skip(self), fields(algorithm = A::NAME))]
    pub fn compute(&self) -> Result<A::Output> {
        let output = self.algorithm.run(self.graph)?;
        *self.last.write() = Some(output.clone());
        debug!("analysis result stored");
        Ok(output)
    }

    /// The result of the last successful [`compute`](Self::compute).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotComputed`] before the first successful run
    /// or after [`reset`](Self::reset).
    pub fn last(&self) -> Result<A::Output> {
        self.last.read().clone().ok_or(GraphError::NotComputed)
    }

    pub fn is_computed(&self) -> bool {
        self.last.read().is_some()
    }

    /// Forget the stored result.
    pub fn reset(&self) {
        *self.last.write() = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bfs {
    pub start: VertexId,
}

impl Algorithm for Bfs {
    type Output = Vec<VertexId>;
    const NAME: &'static str = "bfs";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.bfs(self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dfs {
    pub start: VertexId,
}

impl Algorithm for Dfs {
    type Output = Vec<VertexId>;
    const NAME: &'static str = "dfs";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.dfs(self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dijkstra {
    pub source: VertexId,
}

impl Algorithm for Dijkstra {
    type Output = ShortestPaths;
    const NAME: &'static str = "dijkstra";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.dijkstra(self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BellmanFord {
    pub source: VertexId,
}

impl Algorithm for BellmanFord {
    type Output = BellmanFordResult;
    const NAME: &'static str = "bellman_ford";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.bellman_ford(self.source)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloydWarshall;

impl Algorithm for FloydWarshall {
    type Output = AllPairsShortestPaths;
    const NAME: &'static str = "floyd_warshall";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        Ok(graph.floyd_warshall())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kruskal;

impl Algorithm for Kruskal {
    type Output = MstResult;
    const NAME: &'static str = "kruskal";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.kruskal()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prim(pub PrimConfig);

impl Algorithm for Prim {
    type Output = MstResult;
    const NAME: &'static str = "prim";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.prim(&self.0)
    }
}

/// Articulation points, bridges and biconnected components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Biconnected;

impl Algorithm for Biconnected {
    type Output = BiconnectedResult;
    const NAME: &'static str = "biconnected";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.biconnected_components()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kosaraju(pub SccConfig);

impl Algorithm for Kosaraju {
    type Output = SccResult;
    const NAME: &'static str = "kosaraju";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.kosaraju(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tarjan(pub SccConfig);

impl Algorithm for Tarjan {
    type Output = SccResult;
    const NAME: &'static str = "tarjan";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.tarjan(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologicalSort;

impl Algorithm for TopologicalSort {
    type Output = TopologicalOrder;
    const NAME: &'static str = "topological_sort";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.topological_sort()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EulerPath;

impl Algorithm for EulerPath {
    type Output = Option<Vec<VertexId>>;
    const NAME: &'static str = "euler_path";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        Ok(graph.euler_path())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EulerCircuit;

impl Algorithm for EulerCircuit {
    type Output = Option<Vec<VertexId>>;
    const NAME: &'static str = "euler_circuit";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        Ok(graph.euler_circuit())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HamiltonianPath(pub HamiltonianConfig);

impl Algorithm for HamiltonianPath {
    type Output = HamiltonianResult;
    const NAME: &'static str = "hamiltonian_path";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.hamiltonian_path(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HamiltonianCircuit(pub HamiltonianConfig);

impl Algorithm for HamiltonianCircuit {
    type Output = HamiltonianResult;
    const NAME: &'static str = "hamiltonian_circuit";

    fn run(&self, graph: &Graph) -> Result<Self::Output> {
        graph.hamiltonian_circuit(&self.0)
    }
}
