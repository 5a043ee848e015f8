//! Graph algorithms module.
//!
//! This module provides the classical algorithms over [`Graph`](crate::Graph):
//! - Breadth/depth first traversal, reachability and components
//! - Single-source shortest paths (Dijkstra, Bellman-Ford)
//! - All-pairs shortest paths (Floyd-Warshall)
//! - Minimum spanning trees (Kruskal, Prim)
//! - Biconnected components, articulation points, and bridges
//! - Strongly Connected Components (Kosaraju and Tarjan)
//! - Topological sort with cycle detection
//! - Euler paths and circuits (Hierholzer)
//! - Hamiltonian paths and circuits (backtracking)

mod bellman_ford;
mod biconnected;
mod dijkstra;
mod euler;
mod floyd_warshall;
mod hamiltonian;
mod mst;
mod scc;
mod topological;
mod traversal;

pub use bellman_ford::BellmanFordResult;
pub use biconnected::BiconnectedResult;
pub use dijkstra::ShortestPaths;
pub use euler::EulerStatus;
pub use floyd_warshall::AllPairsShortestPaths;
pub use hamiltonian::{HamiltonianConfig, HamiltonianResult};
pub use mst::{MstEdge, MstResult, PrimConfig, PrimItem};
pub use scc::{SccConfig, SccResult};
pub use topological::TopologicalOrder;
pub use traversal::ComponentsResult;
