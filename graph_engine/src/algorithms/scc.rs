//! Strongly connected components (Kosaraju and Tarjan).
//!
//! A strongly connected component (SCC) is a maximal set of vertices such that
//! there is a path from every vertex to every other vertex in the set.
//!
//! Both algorithms run iteratively with explicit frame stacks. They label
//! components in different orders, so compare results with
//! [`SccResult::same_partition`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Graph, GraphKind, GraphView, Result, VertexId};

/// Configuration for SCC computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SccConfig {
    /// Whether to compute the condensation DAG.
    pub compute_condensation: bool,
}

impl SccConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_condensation(mut self) -> Self {
        self.compute_condensation = true;
        self
    }
}

/// Result of SCC computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccResult {
    /// Component id of each vertex.
    pub component_of: Vec<usize>,
    /// Vertices of each component, ascending (indexed by component id).
    pub members: Vec<Vec<VertexId>>,
    /// Number of strongly connected components.
    pub component_count: usize,
    /// Edges in the condensation DAG: (`from_component`, `to_component`).
    /// Only populated if `compute_condensation` was set.
    pub condensation_edges: Vec<(usize, usize)>,
    /// Topological order of components (if condensation computed).
    pub topological_order: Vec<usize>,
}

impl SccResult {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            component_of: Vec::new(),
            members: Vec::new(),
            component_count: 0,
            condensation_edges: Vec::new(),
            topological_order: Vec::new(),
        }
    }

    fn from_components(component_of: Vec<usize>, component_count: usize) -> Self {
        let mut members = vec![Vec::new(); component_count];
        for (v, &c) in component_of.iter().enumerate() {
            members[c].push(v);
        }
        Self {
            component_of,
            members,
            component_count,
            condensation_edges: Vec::new(),
            topological_order: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_strongly_connected(&self) -> bool {
        self.component_count == 1
    }

    #[must_use]
    pub fn same_component(&self, u: VertexId, v: VertexId) -> bool {
        matches!(
            (self.component_of.get(u), self.component_of.get(v)),
            (Some(a), Some(b)) if a == b
        )
    }

    /// True when both results group the vertices identically, whatever
    /// the component labels.
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        if self.component_of.len() != other.component_of.len()
            || self.component_count != other.component_count
        {
            return false;
        }
        let mut forward = vec![None; self.component_count];
        for (&a, &b) in self.component_of.iter().zip(&other.component_of) {
            match forward[a] {
                None => forward[a] = Some(b),
                Some(mapped) if mapped != b => return false,
                Some(_) => {},
            }
        }
        // Equal component counts make an injective total mapping bijective.
        let distinct: BTreeSet<_> = forward.iter().flatten().collect();
        distinct.len() == self.component_count
    }

    #[must_use]
    pub fn largest_component(&self) -> Option<&[VertexId]> {
        self.members
            .iter()
            .max_by_key(|m| m.len())
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn components_by_size(&self) -> Vec<(usize, usize)> {
        let mut sizes: Vec<_> = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.len()))
            .collect();
        sizes.sort_by(|a, b| b.1.cmp(&a.1));
        sizes
    }
}

impl Default for SccResult {
    fn default() -> Self {
        Self::empty()
    }
}

const UNVISITED: usize = usize::MAX;

/// Vertices in increasing DFS finishing time over the whole graph.
fn finishing_order(view: &GraphView<'_>) -> Vec<VertexId> {
    let n = view.vertex_count();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack: Vec<(VertexId, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));

        while let Some((v, cursor)) = stack.last_mut() {
            let v = *v;
            let edges = view.edges_from(v);
            if let Some(edge) = edges.get(*cursor) {
                *cursor += 1;
                if !visited[edge.to] {
                    visited[edge.to] = true;
                    stack.push((edge.to, 0));
                }
            } else {
                stack.pop();
                order.push(v);
            }
        }
    }
    order
}

pub(crate) fn kosaraju_on(view: &GraphView<'_>) -> SccResult {
    let n = view.vertex_count();
    let order = finishing_order(view);

    let mut reverse = vec![Vec::new(); n];
    for edge in view.edges() {
        reverse[edge.to].push(edge.from);
    }

    let mut component_of = vec![UNVISITED; n];
    let mut count = 0;
    let mut stack = Vec::new();
    for &root in order.iter().rev() {
        if component_of[root] != UNVISITED {
            continue;
        }
        component_of[root] = count;
        stack.push(root);
        while let Some(v) = stack.pop() {
            for &u in &reverse[v] {
                if component_of[u] == UNVISITED {
                    component_of[u] = count;
                    stack.push(u);
                }
            }
        }
        count += 1;
    }

    SccResult::from_components(component_of, count)
}

/// Internal state for Tarjan's algorithm.
struct TarjanState {
    index: usize,
    indices: Vec<usize>,
    low_links: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<VertexId>,
    component_of: Vec<usize>,
    component_count: usize,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: 0,
            indices: vec![UNVISITED; n],
            low_links: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            component_of: vec![UNVISITED; n],
            component_count: 0,
        }
    }

    fn visit(&mut self, v: VertexId) {
        self.indices[v] = self.index;
        self.low_links[v] = self.index;
        self.index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn strongconnect(&mut self, view: &GraphView<'_>, root: VertexId) {
        let mut frames: Vec<(VertexId, usize)> = vec![(root, 0)];
        self.visit(root);

        while let Some((v, cursor)) = frames.last_mut() {
            let v = *v;
            if let Some(edge) = view.edges_from(v).get(*cursor) {
                *cursor += 1;
                let w = edge.to;
                if self.indices[w] == UNVISITED {
                    self.visit(w);
                    frames.push((w, 0));
                } else if self.on_stack[w] {
                    self.low_links[v] = self.low_links[v].min(self.indices[w]);
                }
                continue;
            }

            // v is a root node: pop the stack and generate an SCC
            if self.low_links[v] == self.indices[v] {
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    self.component_of[w] = self.component_count;
                    if w == v {
                        break;
                    }
                }
                self.component_count += 1;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.low_links[parent] = self.low_links[parent].min(self.low_links[v]);
            }
        }
    }
}

pub(crate) fn tarjan_on(view: &GraphView<'_>) -> SccResult {
    let n = view.vertex_count();
    let mut state = TarjanState::new(n);
    for v in 0..n {
        if state.indices[v] == UNVISITED {
            state.strongconnect(view, v);
        }
    }
    SccResult::from_components(state.component_of, state.component_count)
}

/// Fills the condensation DAG and a topological order of its components.
fn attach_condensation(view: &GraphView<'_>, result: &mut SccResult) {
    let count = result.component_count;
    let mut edges = BTreeSet::new();
    for edge in view.edges() {
        let from = result.component_of[edge.from];
        let to = result.component_of[edge.to];
        if from != to {
            edges.insert((from, to));
        }
    }

    let mut successors = vec![Vec::new(); count];
    let mut in_degree = vec![0usize; count];
    for &(from, to) in &edges {
        successors[from].push(to);
        in_degree[to] += 1;
    }

    // Kahn's algorithm
    let mut queue: Vec<usize> = (0..count).filter(|&c| in_degree[c] == 0).collect();
    queue.reverse();
    let mut order = Vec::with_capacity(count);
    while let Some(c) = queue.pop() {
        order.push(c);
        for &next in &successors[c] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push(next);
            }
        }
    }

    result.condensation_edges = edges.into_iter().collect();
    result.topological_order = order;
}

impl Graph {
    /// Strongly connected components using Kosaraju's two-pass algorithm.
    ///
    /// Time complexity: O(V + E)
    #[instrument(skip(self))]
    pub fn kosaraju(&self, config: &SccConfig) -> Result<SccResult> {
        self.require("kosaraju", GraphKind::Directed)?;
        let view = self.read();
        let mut result = kosaraju_on(&view);
        if config.compute_condensation {
            attach_condensation(&view, &mut result);
        }
        debug!(components = result.component_count, "kosaraju finished");
        Ok(result)
    }

    /// Strongly connected components using Tarjan's single-pass algorithm.
    ///
    /// Time complexity: O(V + E)
    #[instrument(skip(self))]
    pub fn tarjan(&self, config: &SccConfig) -> Result<SccResult> {
        self.require("tarjan", GraphKind::Directed)?;
        let view = self.read();
        let mut result = tarjan_on(&view);
        if config.compute_condensation {
            attach_condensation(&view, &mut result);
        }
        debug!(components = result.component_count, "tarjan finished");
        Ok(result)
    }

    /// Compute strongly connected components (Tarjan).
    pub fn strongly_connected_components(&self, config: &SccConfig) -> Result<SccResult> {
        self.tarjan(config)
    }

    /// Check if the graph is strongly connected.
    pub fn is_strongly_connected(&self) -> Result<bool> {
        let result = self.strongly_connected_components(&SccConfig::default())?;
        Ok(result.is_strongly_connected())
    }
}
