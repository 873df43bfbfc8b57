//! Classical ground truth for checking annealer results: reachability, every minimum weight path
//! between two vertices, and modularity of a partition with a greedy baseline.

use crate::graph::Graph;
use petgraph::algo::{dijkstra, has_path_connecting};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

/// True if there is a path from `source` to `target`.
pub fn has_path(graph: &Graph, source: usize, target: usize) -> bool {
    if source >= graph.num_nodes() || target >= graph.num_nodes() {
        return false;
    }
    let g = graph.to_petgraph();
    has_path_connecting(&g, NodeIndex::new(source), NodeIndex::new(target), None)
}

/// Total weight of a path given as a vertex sequence, `None` if a step is not an edge.
pub fn path_weight(graph: &Graph, path: &[usize]) -> Option<u64> {
    path.windows(2)
        .map(|step| graph.edge_cost(step[0], step[1]))
        .sum()
}

/// Every minimum weight path from `source` to `target`, each as a vertex sequence. Empty if the
/// target is unreachable. Unweighted edges count as 1.
pub fn all_shortest_paths(graph: &Graph, source: usize, target: usize) -> Vec<Vec<usize>> {
    shortest_paths_from(graph, source)
        .remove(&target)
        .unwrap_or_default()
}

/// Every minimum weight path from `source` to each vertex it reaches, keyed by target. Builds
/// one petgraph view and runs a single dijkstra. The source itself is not a key.
pub fn shortest_paths_from(graph: &Graph, source: usize) -> BTreeMap<usize, Vec<Vec<usize>>> {
    let mut paths = BTreeMap::new();
    if source >= graph.num_nodes() {
        return paths;
    }

    let g = graph.to_petgraph();
    let start = NodeIndex::new(source);
    let distances = dijkstra(&g, start, None, |e| *e.weight());

    for &target in distances.keys() {
        if target != start {
            paths.insert(target.index(), tight_paths(&g, &distances, start, target));
        }
    }

    paths
}

// walk back from the target along edges that are tight with respect to the distances
fn tight_paths(
    g: &DiGraph<usize, u64>,
    distances: &HashMap<NodeIndex, u64>,
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<Vec<usize>> {
    fn dfs(
        v: NodeIndex,
        source: NodeIndex,
        g: &DiGraph<usize, u64>,
        distances: &HashMap<NodeIndex, u64>,
        suffix: &mut Vec<usize>,
        output: &mut Vec<Vec<usize>>,
    ) {
        suffix.push(v.index());

        if v == source {
            output.push(suffix.iter().rev().copied().collect());
        } else {
            let d_v = distances[&v];
            for e in g.edges_directed(v, Direction::Incoming) {
                let u = e.source();
                // zero weight edges are tight both ways, a path never revisits a vertex
                if suffix.contains(&u.index()) {
                    continue;
                }
                if let Some(&d_u) = distances.get(&u) {
                    if d_u + *e.weight() == d_v {
                        dfs(u, source, g, distances, suffix, output);
                    }
                }
            }
        }

        suffix.pop();
    }

    let mut output = Vec::new();
    dfs(target, source, g, distances, &mut Vec::new(), &mut output);

    // parallel tight edges (an undirected edge stored twice) give repeated paths
    output.sort();
    output.dedup();
    output
}

/// Newman modularity of a partition, where `partition[v]` is the community of v. Edge weights
/// are used when present. A graph without edges, or a partition that does not cover every
/// vertex, has modularity 0.
pub fn modularity(graph: &Graph, partition: &[usize]) -> f64 {
    let m = graph.total_weight() as f64;
    if m == 0.0 || partition.len() < graph.num_nodes() {
        return 0.0;
    }

    let communities = partition.iter().copied().max().map_or(0, |c| c + 1);
    let mut inner = vec![0.0; communities];
    let mut degree = vec![0.0; communities];

    for e in graph.edges() {
        let w = e.cost() as f64;
        if partition[e.source] == partition[e.target] {
            inner[partition[e.source]] += w;
        }
    }
    for (v, k) in graph.weighted_degrees().into_iter().enumerate() {
        degree[partition[v]] += k;
    }

    inner
        .iter()
        .zip(&degree)
        .map(|(l_c, d_c)| l_c / m - (d_c / (2.0 * m)).powi(2))
        .sum()
}

/// Agglomerative greedy modularity maximisation. Starts from singletons and repeatedly applies
/// the merge with the best resulting modularity, while that improves modularity or while there
/// are more than `max_communities` communities. Communities are numbered densely from 0.
pub fn greedy_modularity_communities(graph: &Graph, max_communities: usize) -> Vec<usize> {
    let n = graph.num_nodes();
    let mut partition: Vec<usize> = (0..n).collect();
    let mut current = modularity(graph, &partition);

    loop {
        let mut labels = partition.clone();
        labels.sort_unstable();
        labels.dedup();

        if labels.len() <= 1 {
            break;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for (i, &a) in labels.iter().enumerate() {
            for &b in &labels[i + 1..] {
                let merged: Vec<usize> = partition
                    .iter()
                    .map(|&c| if c == b { a } else { c })
                    .collect();
                let q = modularity(graph, &merged);
                if best.map_or(true, |(_, _, best_q)| q > best_q) {
                    best = Some((a, b, q));
                }
            }
        }

        let Some((a, b, q)) = best else {
            break;
        };

        if q > current || labels.len() > max_communities.max(1) {
            for c in &mut partition {
                if *c == b {
                    *c = a;
                }
            }
            current = q;
        } else {
            break;
        }
    }

    compact_labels(&partition)
}

/// Renumbers community labels to 0..k in order of first appearance.
pub fn compact_labels(partition: &[usize]) -> Vec<usize> {
    let mut mapping = HashMap::new();
    partition
        .iter()
        .map(|c| {
            let next = mapping.len();
            *mapping.entry(*c).or_insert(next)
        })
        .collect()
}
