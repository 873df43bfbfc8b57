//! Shortest path QUBO.
//!
//! The variables pick one source `s<v>`, one target `t<v>` and a set of edges `<x>-<y>`. The
//! penalties make the selected edges a single chain from the source to the target, and the
//! diagonal of each edge variable carries its weight, so the ground state is a shortest path.
//!
//! A valid path of weight W has energy W - p, which is negative because p exceeds the total edge
//! weight. The empty assignment has energy 0.

use crate::error::QuboError;
use crate::graph::Graph;
use crate::qubo::{Qubo, QuboBuilder};
use crate::variables::ApspIndex;
use tracing::debug;

/// Penalty weight, one more than the total edge weight.
pub fn apsp_penalty(graph: &Graph) -> f64 {
    1.0 + graph.total_weight() as f64
}

/// Builds the shortest path QUBO of a weighted graph over 2n + m variables.
///
/// Example:
/// ```rust
/// use graph_qubo::encoders::create_qubo_apsp;
/// use graph_qubo::graph::Graph;
///
/// let g = Graph::from_weighted_edges(3, &[(0, 1, 2), (1, 2, 5)], true);
/// let p = create_qubo_apsp(&g).unwrap();
/// assert_eq!(p.num_x(), 8);
/// ```
///
/// # Errors
///
/// Returns `QuboError::UnweightedGraph` if any edge has no weight.
pub fn create_qubo_apsp(graph: &Graph) -> Result<Qubo, QuboError> {
    if !graph.is_weighted() {
        return Err(QuboError::UnweightedGraph);
    }

    let index = ApspIndex::new(graph);
    let vertices = graph.num_nodes();
    let edges = graph.edges();
    let p = apsp_penalty(graph);

    debug!(vertices, edges = edges.len(), penalty = p, "building APSP QUBO");

    let mut q = QuboBuilder::new(index.labels());

    // at most one source and at most one target
    for i in 0..vertices {
        for j in 0..vertices {
            if i != j {
                q.add(index.source(i), index.source(j), p);
                q.add(index.target(i), index.target(j), p);
            }
        }
    }

    // a vertex cannot be both source and target
    for v in 0..vertices {
        q.add(index.source(v), index.target(v), p);
    }

    // the source has one more edge leaving than entering, the target one more entering
    for v in 0..vertices {
        for (i, e) in edges.iter().enumerate() {
            if e.source == v {
                q.add(index.source(v), index.edge(i), -p);
                q.add(index.target(v), index.edge(i), p);
            }
            if e.target == v {
                q.add(index.source(v), index.edge(i), p);
                q.add(index.target(v), index.edge(i), -p);
            }
        }
    }

    // no branching, and consecutive edges are rewarded
    for (i, e_i) in edges.iter().enumerate() {
        for (j, e_j) in edges.iter().enumerate() {
            if e_i.source == e_j.source || e_i.target == e_j.target {
                q.add(index.edge(i), index.edge(j), p);
            }
            if e_i.target == e_j.source || e_i.source == e_j.target {
                q.add(index.edge(i), index.edge(j), -p / 2.0);
            }
        }
    }

    // objective: total weight of the selected edges
    for (i, e) in edges.iter().enumerate() {
        q.add_linear(index.edge(i), e.cost() as f64);
    }

    Ok(q.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::Variable;
    use ndarray::Array1;

    fn path_graph() -> Graph {
        Graph::from_weighted_edges(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1)], true)
    }

    fn point(p: &Qubo, vars: &[Variable]) -> Array1<usize> {
        let mut x = Array1::zeros(p.num_x());
        for var in vars {
            x[p.index_of(var).unwrap()] = 1;
        }
        x
    }

    #[test]
    fn test_size_and_shape() {
        let p = create_qubo_apsp(&path_graph()).unwrap();

        assert_eq!(p.num_x(), 2 * 4 + 3);
        assert_eq!(p.q.rows(), p.q.cols());
        assert!(p.is_upper_triangular());
        assert_eq!(p.labels[0], Variable::Source(0));
        assert_eq!(p.labels[4], Variable::Target(0));
        assert_eq!(p.labels[8], Variable::Edge(0, 1));
    }

    #[test]
    fn test_penalty_coefficients() {
        let g = path_graph();
        let p = create_qubo_apsp(&g).unwrap();
        let pen = apsp_penalty(&g);

        assert_eq!(pen, 4.0);
        // two sources, counted for both orderings
        assert_eq!(p.coefficient(0, 1), 2.0 * pen);
        assert_eq!(p.coefficient(4, 5), 2.0 * pen);
        assert_eq!(p.coefficient(0, 4), pen);
        // s0 and the edge leaving 0
        assert_eq!(p.coefficient(0, 8), -pen);
        // s1 with the edge entering and the edge leaving 1 cancel out per edge
        assert_eq!(p.coefficient(1, 8), pen);
        assert_eq!(p.coefficient(1, 9), -pen);
        // consecutive edges 0-1 and 1-2
        assert_eq!(p.coefficient(8, 9), -pen);
        // each edge variable carries its weight plus its own branching term
        assert_eq!(p.linear(8), 1.0 + pen);
    }

    #[test]
    fn test_valid_path_energy() {
        let g = path_graph();
        let p = create_qubo_apsp(&g).unwrap();
        let pen = apsp_penalty(&g);

        let x = point(
            &p,
            &[
                Variable::Source(0),
                Variable::Target(3),
                Variable::Edge(0, 1),
                Variable::Edge(1, 2),
                Variable::Edge(2, 3),
            ],
        );
        assert_eq!(p.eval_usize(&x), 3.0 - pen);

        let x = point(
            &p,
            &[Variable::Source(1), Variable::Target(2), Variable::Edge(1, 2)],
        );
        assert_eq!(p.eval_usize(&x), 1.0 - pen);
    }

    #[test]
    fn test_invalid_assignments_are_not_negative() {
        let g = path_graph();
        let p = create_qubo_apsp(&g).unwrap();

        // source equal to target
        let x = point(&p, &[Variable::Source(1), Variable::Target(1)]);
        assert!(p.eval_usize(&x) > 0.0);

        // broken chain
        let x = point(
            &p,
            &[
                Variable::Source(0),
                Variable::Target(3),
                Variable::Edge(0, 1),
                Variable::Edge(2, 3),
            ],
        );
        assert!(p.eval_usize(&x) >= 0.0);

        assert_eq!(p.eval_usize(&Array1::zeros(p.num_x())), 0.0);
    }

    #[test]
    fn test_unweighted_rejected() {
        let g = Graph::from_edges(3, &[(0, 1)], true);
        assert_eq!(create_qubo_apsp(&g).unwrap_err(), QuboError::UnweightedGraph);
    }
}
