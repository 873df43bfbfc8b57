//! Community detection QUBO.
//!
//! Variable `(v, c)` says vertex v is in community c. Putting two vertices in the same community
//! costs their expected shared edge weight under the configuration null model,
//! k_u k_v / 2m, and earns back the weight of the edge between them if there is one. Minimising
//! the sum maximises modularity.

use crate::error::QuboError;
use crate::graph::Graph;
use crate::qubo::{Qubo, QuboBuilder};
use crate::variables::{community_index, community_labels};
use tracing::debug;

/// Builds the community detection QUBO of a weighted, undirected graph over n * communities
/// variables.
///
/// # Errors
///
/// The graph must be weighted, undirected and have positive total weight, and `communities`
/// must be at least 1.
pub fn create_qubo_cd(graph: &Graph, communities: usize) -> Result<Qubo, QuboError> {
    if communities == 0 {
        return Err(QuboError::InvalidCommunityCount(communities));
    }
    if !graph.is_weighted() {
        return Err(QuboError::UnweightedGraph);
    }
    if graph.is_directed() {
        return Err(QuboError::DirectedGraph);
    }

    let vertices = graph.num_nodes();
    let p = graph.total_weight() as f64;
    if p <= 0.0 {
        return Err(QuboError::EmptyGraph);
    }
    let k = graph.weighted_degrees();

    debug!(vertices, communities, penalty = p, "building CD QUBO");

    let idx = |v: usize, c: usize| community_index(v, c, communities);
    let mut q = QuboBuilder::new(community_labels(vertices, communities));

    // a vertex sits in one community
    for v in 0..vertices {
        for c1 in 0..communities {
            for c2 in 0..communities {
                if c1 != c2 {
                    q.add(idx(v, c1), idx(v, c2), p);
                }
            }
        }
    }

    // null model cost of sharing a community
    for c in 0..communities {
        for v1 in 0..vertices {
            for v2 in v1 + 1..vertices {
                q.add(idx(v1, c), idx(v2, c), k[v1] * k[v2] / (2.0 * p));
            }
        }
    }

    // reward for keeping an edge inside a community
    for e in graph.edges() {
        for c in 0..communities {
            q.add(idx(e.source, c), idx(e.target, c), -(e.cost() as f64));
        }
    }

    Ok(q.build())
}
