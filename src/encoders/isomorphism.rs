//! Graph isomorphism QUBO.
//!
//! Variable `s->t` says vertex s of the first graph maps to vertex t of the second. Mapping a
//! source twice or hitting a target twice costs p = |E1|, and every edge of the first graph that
//! lands on an edge of the second earns 1. Edge orientation is ignored, so an isomorphism of
//! simple graphs has energy -|E1|.

use crate::error::QuboError;
use crate::graph::Graph;
use crate::qubo::{Qubo, QuboBuilder};
use crate::variables::{mapping_index, mapping_labels};
use tracing::debug;

/// Builds the isomorphism QUBO of two graphs with the same vertex count over n^2 variables.
///
/// # Errors
///
/// Returns `QuboError::VertexCountMismatch` if the graphs differ in size.
pub fn create_qubo_gi(g1: &Graph, g2: &Graph) -> Result<Qubo, QuboError> {
    if g1.num_nodes() != g2.num_nodes() {
        return Err(QuboError::VertexCountMismatch {
            left: g1.num_nodes(),
            right: g2.num_nodes(),
        });
    }

    let vertices = g1.num_nodes();
    let p = g1.num_edges() as f64;

    debug!(vertices, penalty = p, "building GI QUBO");

    let idx = |s: usize, t: usize| mapping_index(s, t, vertices);
    let mut q = QuboBuilder::new(mapping_labels(vertices));

    // one target per source, one source per target
    for i in 0..vertices {
        for j in 0..vertices {
            for k in j + 1..vertices {
                q.add(idx(i, j), idx(i, k), p);
                q.add(idx(j, i), idx(k, i), p);
            }
        }
    }

    // (x1, y1) -> (x2, y2) either way round
    for e1 in g1.edges() {
        for e2 in g2.edges() {
            q.add(idx(e1.source, e2.source), idx(e1.target, e2.target), -1.0);
            q.add(idx(e1.source, e2.target), idx(e1.target, e2.source), -1.0);
        }
    }

    Ok(q.build())
}

/// Energy of an exact isomorphism under [`create_qubo_gi`], the target for
/// [`check_result_gi`](crate::check_result::check_result_gi).
pub fn expected_gi_energy(g1: &Graph) -> i64 {
    -(g1.num_edges() as i64)
}
