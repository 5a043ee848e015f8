//! Breadth-first and depth-first traversal, reachability and components.
//!
//! Visitation order follows adjacency insertion order. Both traversals only
//! cover the part of the graph reachable from the start vertex.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::collections::{DisjointSet, UnionFind};
use crate::{Graph, GraphView, Result, VertexId};

/// Partition of the vertices into connected components.
///
/// For directed graphs the partition is by weak connectivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentsResult {
    /// Component label of each vertex, numbered by first appearance.
    pub component_of: Vec<usize>,
    /// Number of components.
    pub component_count: usize,
}

impl ComponentsResult {
    #[must_use]
    pub fn members(&self) -> Vec<Vec<VertexId>> {
        let mut members = vec![Vec::new(); self.component_count];
        for (v, &c) in self.component_of.iter().enumerate() {
            members[c].push(v);
        }
        members
    }

    #[must_use]
    pub fn same_component(&self, u: VertexId, v: VertexId) -> bool {
        match (self.component_of.get(u), self.component_of.get(v)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) fn bfs_order(view: &GraphView<'_>, start: VertexId) -> Vec<VertexId> {
    let mut visited = vec![false; view.vertex_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for edge in view.edges_from(current) {
            if !visited[edge.to] {
                visited[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
    }
    order
}

/// Pre-order DFS with an explicit stack of `(vertex, next adjacency index)`.
///
/// Produces the same order as the recursive formulation.
pub(crate) fn dfs_order(view: &GraphView<'_>, start: VertexId) -> Vec<VertexId> {
    let mut visited = vec![false; view.vertex_count()];
    let mut order = vec![start];
    let mut stack = vec![(start, 0usize)];
    visited[start] = true;

    while let Some(frame) = stack.last_mut() {
        let (v, cursor) = *frame;
        let edges = view.edges_from(v);
        if let Some(offset) = edges[cursor..].iter().position(|e| !visited[e.to]) {
            let next = edges[cursor + offset].to;
            frame.1 = cursor + offset + 1;
            visited[next] = true;
            order.push(next);
            stack.push((next, 0));
        } else {
            stack.pop();
        }
    }
    order
}

pub(crate) fn reachable_from(view: &GraphView<'_>, start: VertexId) -> Vec<bool> {
    let mut reached = vec![false; view.vertex_count()];
    for v in bfs_order(view, start) {
        reached[v] = true;
    }
    reached
}

pub(crate) fn components(view: &GraphView<'_>) -> ComponentsResult {
    let n = view.vertex_count();
    let mut sets = UnionFind::new(n);
    for edge in view.edges() {
        sets.union(edge.from, edge.to);
    }

    let mut label_of_root = vec![usize::MAX; n];
    let mut component_of = vec![0; n];
    let mut component_count = 0;
    for v in 0..n {
        let root = sets.find(v);
        if label_of_root[root] == usize::MAX {
            label_of_root[root] = component_count;
            component_count += 1;
        }
        component_of[v] = label_of_root[root];
    }

    ComponentsResult {
        component_of,
        component_count,
    }
}

impl Graph {
    /// Breadth-first visitation order from `start`.
    #[instrument(skip(self))]
    pub fn bfs(&self, start: VertexId) -> Result<Vec<VertexId>> {
        self.check_vertex(start)?;
        Ok(bfs_order(&self.read(), start))
    }

    /// Depth-first pre-order from `start`.
    #[instrument(skip(self))]
    pub fn dfs(&self, start: VertexId) -> Result<Vec<VertexId>> {
        self.check_vertex(start)?;
        Ok(dfs_order(&self.read(), start))
    }

    /// `reachable[v]` is true when `v` can be reached from `start`.
    pub fn reachable(&self, start: VertexId) -> Result<Vec<bool>> {
        self.check_vertex(start)?;
        Ok(reachable_from(&self.read(), start))
    }

    /// Hop count from `start` to every vertex; `None` when unreachable.
    pub fn bfs_levels(&self, start: VertexId) -> Result<Vec<Option<usize>>> {
        self.check_vertex(start)?;
        let view = self.read();
        let mut levels = vec![None; view.vertex_count()];
        let mut queue = VecDeque::new();
        levels[start] = Some(0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let next_level = levels[current].map(|l| l + 1);
            for edge in view.edges_from(current) {
                if levels[edge.to].is_none() {
                    levels[edge.to] = next_level;
                    queue.push_back(edge.to);
                }
            }
        }
        Ok(levels)
    }

    /// Connected components (weak components for directed graphs).
    #[instrument(skip(self))]
    pub fn connected_components(&self) -> ComponentsResult {
        let result = components(&self.read());
        debug!(components = result.component_count, "connected components");
        result
    }

    /// True when the graph has at most one connected component.
    pub fn is_connected(&self) -> bool {
        self.connected_components().component_count <= 1
    }
}
