//! Biconnected components, articulation points, and bridges.
//!
//! - Articulation point: A vertex whose removal disconnects the graph
//! - Bridge: An edge whose removal disconnects the graph
//! - Biconnected component: A maximal subgraph with no articulation points
//!
//! One low-link DFS per connected component, run with an explicit frame
//! stack. The edge back to the parent is recognised by its edge id, so a
//! parallel edge to the parent counts as a back edge.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{EdgeId, Graph, GraphKind, GraphView, Result, VertexId};

/// Result of biconnected component analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiconnectedResult {
    /// Articulation points (cut vertices), ascending.
    pub articulation_points: Vec<VertexId>,
    /// Bridges (cut edges) as `(min, max)` pairs, ascending.
    pub bridges: Vec<(VertexId, VertexId)>,
    /// Biconnected components (each as a set of edges).
    pub components: Vec<BTreeSet<(VertexId, VertexId)>>,
    /// Number of biconnected components.
    pub component_count: usize,
}

impl BiconnectedResult {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            articulation_points: Vec::new(),
            bridges: Vec::new(),
            components: Vec::new(),
            component_count: 0,
        }
    }

    #[must_use]
    pub fn is_biconnected(&self) -> bool {
        self.articulation_points.is_empty() && self.component_count <= 1
    }

    #[must_use]
    pub fn has_bridges(&self) -> bool {
        !self.bridges.is_empty()
    }

    #[must_use]
    pub fn is_articulation_point(&self, v: VertexId) -> bool {
        self.articulation_points.binary_search(&v).is_ok()
    }
}

impl Default for BiconnectedResult {
    fn default() -> Self {
        Self::empty()
    }
}

const UNVISITED: usize = usize::MAX;

struct Frame {
    vertex: VertexId,
    parent_edge: Option<EdgeId>,
    cursor: usize,
}

/// Internal state for the low-link search.
struct BiconnectedState {
    time: usize,
    discovery: Vec<usize>,
    low: Vec<usize>,
    articulation: Vec<bool>,
    bridges: Vec<(VertexId, VertexId)>,
    edge_stack: Vec<(EdgeId, VertexId, VertexId)>,
    components: Vec<BTreeSet<(VertexId, VertexId)>>,
}

impl BiconnectedState {
    fn new(n: usize) -> Self {
        Self {
            time: 0,
            discovery: vec![UNVISITED; n],
            low: vec![UNVISITED; n],
            articulation: vec![false; n],
            bridges: Vec::new(),
            edge_stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn discover(&mut self, v: VertexId) {
        self.discovery[v] = self.time;
        self.low[v] = self.time;
        self.time += 1;
    }

    /// Pops the edge stack down to and including the tree edge `until`.
    fn pop_component(&mut self, until: EdgeId) {
        let mut component = BTreeSet::new();
        while let Some((id, a, b)) = self.edge_stack.pop() {
            component.insert((a.min(b), a.max(b)));
            if id == until {
                break;
            }
        }
        if !component.is_empty() {
            self.components.push(component);
        }
    }

    fn search_from(&mut self, view: &GraphView<'_>, root: VertexId) {
        let mut root_children = 0usize;
        let mut stack = vec![Frame {
            vertex: root,
            parent_edge: None,
            cursor: 0,
        }];
        self.discover(root);

        while let Some(frame) = stack.last_mut() {
            let v = frame.vertex;
            let edges = view.edges_from(v);

            if frame.cursor < edges.len() {
                let edge = edges[frame.cursor];
                frame.cursor += 1;
                if edge.is_self_loop() || Some(edge.id) == frame.parent_edge {
                    continue;
                }

                let w = edge.to;
                if self.discovery[w] == UNVISITED {
                    if v == root {
                        root_children += 1;
                    }
                    self.edge_stack.push((edge.id, v, w));
                    self.discover(w);
                    stack.push(Frame {
                        vertex: w,
                        parent_edge: Some(edge.id),
                        cursor: 0,
                    });
                } else if self.discovery[w] < self.discovery[v] {
                    // Back edge to an ancestor
                    self.low[v] = self.low[v].min(self.discovery[w]);
                    self.edge_stack.push((edge.id, v, w));
                }
                continue;
            }

            let finished = stack.pop();
            let (Some(finished), Some(parent)) = (finished, stack.last()) else {
                continue;
            };
            let u = parent.vertex;
            self.low[u] = self.low[u].min(self.low[v]);

            if self.low[v] >= self.discovery[u] {
                if u != root {
                    self.articulation[u] = true;
                }
                if let Some(tree_edge) = finished.parent_edge {
                    self.pop_component(tree_edge);
                }
            }
            if self.low[v] > self.discovery[u] {
                self.bridges.push((u.min(v), u.max(v)));
            }
        }

        if root_children > 1 {
            self.articulation[root] = true;
        }
    }
}

pub(crate) fn biconnected_on(view: &GraphView<'_>) -> BiconnectedResult {
    let n = view.vertex_count();
    let mut state = BiconnectedState::new(n);

    for root in 0..n {
        if state.discovery[root] == UNVISITED {
            state.search_from(view, root);
        }
    }

    let mut articulation_points: Vec<VertexId> =
        (0..n).filter(|&v| state.articulation[v]).collect();

    // A graph consisting of one edge reports both endpoints as cut vertices.
    if let [only] = view.edges() {
        if !only.is_self_loop() {
            articulation_points = vec![only.from.min(only.to), only.from.max(only.to)];
        }
    }

    let mut bridges = state.bridges;
    bridges.sort_unstable();

    BiconnectedResult {
        articulation_points,
        bridges,
        component_count: state.components.len(),
        components: state.components,
    }
}

impl Graph {
    /// Find biconnected components, articulation points and bridges.
    ///
    /// Time complexity: O(V + E)
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Unsupported`](crate::GraphError) for directed graphs.
    #[instrument(skip(self))]
    pub fn biconnected_components(&self) -> Result<BiconnectedResult> {
        self.require("biconnected components", GraphKind::Undirected)?;
        let result = biconnected_on(&self.read());
        debug!(
            articulation_points = result.articulation_points.len(),
            bridges = result.bridges.len(),
            components = result.component_count,
            "biconnected analysis finished"
        );
        Ok(result)
    }

    /// Find articulation points (cut vertices) in the graph.
    ///
    /// An articulation point is a vertex whose removal increases
    /// the number of connected components.
    pub fn articulation_points(&self) -> Result<Vec<VertexId>> {
        Ok(self.biconnected_components()?.articulation_points)
    }

    /// Find bridges (cut edges) in the graph.
    ///
    /// A bridge is an edge whose removal increases the number
    /// of connected components.
    pub fn bridges(&self) -> Result<Vec<(VertexId, VertexId)>> {
        Ok(self.biconnected_components()?.bridges)
    }

    pub fn is_biconnected(&self) -> Result<bool> {
        Ok(self.biconnected_components()?.is_biconnected())
    }
}
