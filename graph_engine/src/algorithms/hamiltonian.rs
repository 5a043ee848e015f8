//! Hamiltonian paths and circuits by backtracking.
//!
//! The search is exponential in the worst case. It extends the current path
//! with an unvisited successor and undoes the extension when it dead-ends,
//! using an explicit stack of per-depth edge cursors. A step budget bounds
//! the work; running out is reported in the result, not as an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{Graph, GraphView, Result, VertexId};

/// Configuration for Hamiltonian search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HamiltonianConfig {
    /// Maximum number of edge examinations. `None` means unbounded.
    pub max_steps: Option<u64>,
    /// Only try this start vertex. Circuits default to vertex 0.
    pub start: Option<VertexId>,
}

impl HamiltonianConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    #[must_use]
    pub const fn start(mut self, start: VertexId) -> Self {
        self.start = Some(start);
        self
    }
}

/// Result of a Hamiltonian search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HamiltonianResult {
    /// The path found. A circuit repeats its start vertex at the end.
    pub path: Option<Vec<VertexId>>,
    /// Edge examinations performed.
    pub steps: u64,
    /// The step budget ran out before the search completed.
    pub exhausted: bool,
}

impl HamiltonianResult {
    #[must_use]
    pub const fn found(&self) -> bool {
        self.path.is_some()
    }
}

fn adjacent(view: &GraphView<'_>, u: VertexId, v: VertexId) -> bool {
    view.edges_from(u).iter().any(|e| e.to == v)
}

fn visits_all_once(view: &GraphView<'_>, path: &[VertexId]) -> bool {
    let n = view.vertex_count();
    if n == 0 || path.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in path {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    path.windows(2).all(|pair| adjacent(view, pair[0], pair[1]))
}

enum Outcome {
    Found(Vec<VertexId>),
    NotFound,
    Exhausted,
}

struct Search<'v, 'g> {
    view: &'v GraphView<'g>,
    circuit: bool,
    max_steps: Option<u64>,
    steps: u64,
}

impl Search<'_, '_> {
    fn from_start(&mut self, start: VertexId) -> Outcome {
        let view = self.view;
        let n = view.vertex_count();
        let mut visited = vec![false; n];
        let mut path = vec![start];
        let mut cursors = vec![0usize];
        visited[start] = true;

        loop {
            let Some(&v) = path.last() else {
                return Outcome::NotFound;
            };

            if path.len() == n {
                if !self.circuit {
                    return Outcome::Found(path);
                }
                if adjacent(view, v, start) {
                    path.push(start);
                    return Outcome::Found(path);
                }
                // Backtrack
                visited[v] = false;
                path.pop();
                cursors.pop();
                continue;
            }

            let edges = view.edges_from(v);
            let depth = path.len() - 1;
            let mut next = None;
            while let Some(edge) = edges.get(cursors[depth]) {
                cursors[depth] += 1;
                if self.max_steps.is_some_and(|max| self.steps >= max) {
                    return Outcome::Exhausted;
                }
                self.steps += 1;
                if !visited[edge.to] {
                    next = Some(edge.to);
                    break;
                }
            }

            if let Some(w) = next {
                visited[w] = true;
                path.push(w);
                cursors.push(0);
            } else {
                // Backtrack
                visited[v] = false;
                path.pop();
                cursors.pop();
            }
        }
    }
}

impl Graph {
    fn hamiltonian_search(
        &self,
        config: &HamiltonianConfig,
        circuit: bool,
    ) -> Result<HamiltonianResult> {
        if let Some(start) = config.start {
            self.check_vertex(start)?;
        }
        let view = self.read();
        if view.vertex_count() == 0 {
            return Ok(HamiltonianResult::default());
        }

        let starts: Vec<VertexId> = match (config.start, circuit) {
            (Some(start), _) => vec![start],
            (None, true) => vec![0],
            (None, false) => (0..view.vertex_count()).collect(),
        };

        let mut search = Search {
            view: &view,
            circuit,
            max_steps: config.max_steps,
            steps: 0,
        };
        for start in starts {
            match search.from_start(start) {
                Outcome::Found(path) => {
                    debug!(steps = search.steps, circuit, "hamiltonian search succeeded");
                    return Ok(HamiltonianResult {
                        path: Some(path),
                        steps: search.steps,
                        exhausted: false,
                    });
                },
                Outcome::Exhausted => {
                    warn!(steps = search.steps, circuit, "hamiltonian search budget exhausted");
                    return Ok(HamiltonianResult {
                        path: None,
                        steps: search.steps,
                        exhausted: true,
                    });
                },
                Outcome::NotFound => {},
            }
        }

        debug!(steps = search.steps, circuit, "no hamiltonian structure");
        Ok(HamiltonianResult {
            path: None,
            steps: search.steps,
            exhausted: false,
        })
    }

    /// Search for a path visiting every vertex exactly once.
    ///
    /// Every vertex is tried as a start unless `config.start` is set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`](crate::GraphError) for an out-of-range start.
    #[instrument(skip(self))]
    pub fn hamiltonian_path(&self, config: &HamiltonianConfig) -> Result<HamiltonianResult> {
        self.hamiltonian_search(config, false)
    }

    /// Search for a circuit visiting every vertex exactly once.
    ///
    /// The returned path has `V + 1` entries with the start repeated last.
    #[instrument(skip(self))]
    pub fn hamiltonian_circuit(&self, config: &HamiltonianConfig) -> Result<HamiltonianResult> {
        self.hamiltonian_search(config, true)
    }

    /// Check that `path` visits every vertex once along existing edges.
    pub fn is_hamiltonian_path(&self, path: &[VertexId]) -> bool {
        visits_all_once(&self.read(), path)
    }

    /// Check that `circuit` is a Hamiltonian path closed by an edge back to
    /// its start, given as `V + 1` vertices with first and last equal.
    pub fn is_hamiltonian_circuit(&self, circuit: &[VertexId]) -> bool {
        let Some((&last, open)) = circuit.split_last() else {
            return false;
        };
        let view = self.read();
        open.first() == Some(&last)
            && visits_all_once(&view, open)
            && open.last().is_some_and(|&end| adjacent(&view, end, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    fn square() -> Graph {
        let graph = Graph::undirected(4);
        graph
            .add_edges([(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)])
            .unwrap();
        graph
    }

    #[test]
    fn test_square_has_circuit() {
        let graph = square();
        let result = graph.hamiltonian_circuit(&HamiltonianConfig::new()).unwrap();
        let circuit = result.path.unwrap();
        assert_eq!(circuit, vec![0, 1, 2, 3, 0]);
        assert!(graph.is_hamiltonian_circuit(&circuit));
        assert!(!result.exhausted);
    }

    #[test]
    fn test_path_graph_has_path_but_no_circuit() {
        let graph = Graph::undirected(4);
        graph.add_edges([(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();

        let path = graph
            .hamiltonian_path(&HamiltonianConfig::new())
            .unwrap()
            .path
            .unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert!(graph.is_hamiltonian_path(&path));

        let circuit = graph.hamiltonian_circuit(&HamiltonianConfig::new()).unwrap();
        assert!(!circuit.found());
        assert!(!circuit.exhausted);
    }

    #[test]
    fn test_path_needs_other_start() {
        // Star centre first fails; a leaf start also fails
        let star = Graph::undirected(4);
        star.add_edges([(0, 1, 1), (0, 2, 1), (0, 3, 1)]).unwrap();
        assert!(!star.hamiltonian_path(&HamiltonianConfig::new()).unwrap().found());

        let graph = Graph::undirected(3);
        graph.add_edges([(1, 0, 1), (1, 2, 1)]).unwrap();
        let path = graph
            .hamiltonian_path(&HamiltonianConfig::new())
            .unwrap()
            .path
            .unwrap();
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn test_directed_respects_direction() {
        let graph = Graph::directed(3);
        graph.add_edges([(2, 1, 1), (1, 0, 1)]).unwrap();

        let result = graph.hamiltonian_path(&HamiltonianConfig::new()).unwrap();
        assert_eq!(result.path, Some(vec![2, 1, 0]));
        assert!(!graph.is_hamiltonian_path(&[0, 1, 2]));
    }

    #[test]
    fn test_fixed_start() {
        let graph = square();
        let config = HamiltonianConfig::new().start(2);
        let circuit = graph.hamiltonian_circuit(&config).unwrap().path.unwrap();
        assert_eq!(circuit.first(), Some(&2));
        assert_eq!(circuit.last(), Some(&2));
    }

    #[test]
    fn test_invalid_start() {
        let graph = square();
        let err = graph
            .hamiltonian_path(&HamiltonianConfig::new().start(9))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidVertex { vertex: 9, .. }));
    }

    #[test]
    fn test_step_budget_exhausts() {
        let graph = Graph::undirected(8);
        for u in 0..7 {
            for v in (u + 1)..7 {
                graph.add_edge(u, v, 1).unwrap();
            }
        }
        // Vertex 7 is isolated, so the full search is large and fruitless.
        let config = HamiltonianConfig::new().max_steps(500);
        let result = graph.hamiltonian_path(&config).unwrap();
        assert!(result.exhausted);
        assert!(!result.found());
        assert_eq!(result.steps, 500);
    }

    #[test]
    fn test_two_vertex_circuit_uses_single_edge() {
        let graph = Graph::undirected(2);
        graph.add_edge(0, 1, 1).unwrap();
        let result = graph.hamiltonian_circuit(&HamiltonianConfig::new()).unwrap();
        assert_eq!(result.path, Some(vec![0, 1, 0]));
    }

    #[test]
    fn test_validators_reject_bad_sequences() {
        let graph = square();
        // Repeated vertex
        assert!(!graph.is_hamiltonian_path(&[0, 1, 0, 3]));
        // Wrong length
        assert!(!graph.is_hamiltonian_path(&[0, 1, 2]));
        // Non-adjacent pair 0-2
        assert!(!graph.is_hamiltonian_path(&[0, 2, 1, 3]));
        // Out of range
        assert!(!graph.is_hamiltonian_path(&[0, 1, 2, 7]));

        assert!(!graph.is_hamiltonian_circuit(&[0, 1, 2, 3]));
        assert!(!graph.is_hamiltonian_circuit(&[0, 1, 2, 3, 1]));
        assert!(!graph.is_hamiltonian_circuit(&[]));
        assert!(graph.is_hamiltonian_circuit(&[1, 2, 3, 0, 1]));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::undirected(0);
        let result = graph.hamiltonian_path(&HamiltonianConfig::new()).unwrap();
        assert!(!result.found());
        assert!(!graph.is_hamiltonian_path(&[]));
    }
}
