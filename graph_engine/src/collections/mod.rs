//! Narrow collaborator structures used by the algorithms.
//!
//! Each structure sits behind a small trait so an algorithm can be run with
//! a different implementation without changing its semantics:
//! - [`DisjointSet`] (`find` / `union` / `connected`) for Kruskal and
//!   component counting
//! - [`MinPriorityQueue`] (`push` / `pop_min`) for Dijkstra and Prim

mod priority_queue;
mod union_find;

pub use priority_queue::{BinaryHeapQueue, MinPriorityQueue};
pub use union_find::{DisjointSet, UnionFind};
