//! The graph model shared by the generator, the encoders and the validators.
//!
//! Nodes are the dense range `0..num_nodes` so that a node label can index a QUBO row directly.
//! Edges keep their insertion order, the APSP variable space is laid out in that order.

use petgraph::graph::{DiGraph, NodeIndex};

/// A single edge, optionally weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<u32>,
}

impl Edge {
    /// The weight used for path lengths, an unweighted edge counts as 1.
    pub fn cost(&self) -> u64 {
        u64::from(self.weight.unwrap_or(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    num_nodes: usize,
    edges: Vec<Edge>,
    directed: bool,
}

impl Graph {
    pub const fn new(num_nodes: usize, directed: bool) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            directed,
        }
    }

    /// Builds a graph from an unweighted edge list.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)], directed: bool) -> Self {
        let mut graph = Self::new(num_nodes, directed);
        for &(u, v) in edges {
            graph.add_edge(u, v, None);
        }
        graph
    }

    /// Builds a graph from a weighted edge list.
    pub fn from_weighted_edges(
        num_nodes: usize,
        edges: &[(usize, usize, u32)],
        directed: bool,
    ) -> Self {
        let mut graph = Self::new(num_nodes, directed);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, Some(w));
        }
        graph
    }

    /// Adds an edge, growing the node range if needed. Adding an edge that already exists
    /// replaces its weight and keeps its position.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: Option<u32>) {
        self.num_nodes = self.num_nodes.max(source + 1).max(target + 1);

        if let Some(i) = self.find_edge(source, target) {
            self.edges[i].weight = weight;
            return;
        }

        self.edges.push(Edge {
            source,
            target,
            weight,
        });
    }

    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.num_nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// True when every edge carries a weight. An edgeless graph counts as weighted.
    pub fn is_weighted(&self) -> bool {
        self.edges.iter().all(|e| e.weight.is_some())
    }

    /// Position of the edge `source -> target` in the edge list. Undirected graphs match
    /// either orientation.
    pub fn find_edge(&self, source: usize, target: usize) -> Option<usize> {
        self.edges.iter().position(|e| {
            (e.source == source && e.target == target)
                || (!self.directed && e.source == target && e.target == source)
        })
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.find_edge(source, target).is_some()
    }

    /// The stored weight of `source -> target`, `None` if there is no such edge or it is unweighted.
    pub fn weight(&self, source: usize, target: usize) -> Option<u32> {
        self.find_edge(source, target)
            .and_then(|i| self.edges[i].weight)
    }

    /// Path cost of `source -> target`, `None` if there is no such edge.
    pub fn edge_cost(&self, source: usize, target: usize) -> Option<u64> {
        self.find_edge(source, target).map(|i| self.edges[i].cost())
    }

    /// Sum of all edge weights, unweighted edges count as 1.
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(Edge::cost).sum()
    }

    /// Number of edge endpoints at each node, in and out degree combined.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes];
        for e in &self.edges {
            degrees[e.source] += 1;
            degrees[e.target] += 1;
        }
        degrees
    }

    /// Sorted degree sequence, invariant under relabeling.
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees = self.degrees();
        degrees.sort_unstable();
        degrees
    }

    /// Sum of the weights of the edges touching each node.
    pub fn weighted_degrees(&self) -> Vec<f64> {
        let mut k = vec![0.0; self.num_nodes];
        for e in &self.edges {
            let w = e.cost() as f64;
            k[e.source] += w;
            k[e.target] += w;
        }
        k
    }

    /// Applies the node bijection `mapping[old] = new` and returns the relabeled graph. Edge order
    /// and weights are kept. `None` unless `mapping` is a permutation of the nodes.
    pub fn relabel(&self, mapping: &[usize]) -> Option<Self> {
        if mapping.len() != self.num_nodes {
            return None;
        }
        let mut seen = vec![false; self.num_nodes];
        for &new in mapping {
            if new >= self.num_nodes || seen[new] {
                return None;
            }
            seen[new] = true;
        }

        let edges = self
            .edges
            .iter()
            .map(|e| Edge {
                source: mapping[e.source],
                target: mapping[e.target],
                weight: e.weight,
            })
            .collect();

        Some(Self {
            num_nodes: self.num_nodes,
            edges,
            directed: self.directed,
        })
    }

    /// Directed petgraph view with edge costs as weights. Undirected edges appear in both
    /// directions. Node `i` is `NodeIndex::new(i)`.
    pub fn to_petgraph(&self) -> DiGraph<usize, u64> {
        let mut g = DiGraph::with_capacity(self.num_nodes, 2 * self.edges.len());
        for i in 0..self.num_nodes {
            g.add_node(i);
        }
        for e in &self.edges {
            let (u, v) = (NodeIndex::new(e.source), NodeIndex::new(e.target));
            g.add_edge(u, v, e.cost());
            if !self.directed {
                g.add_edge(v, u, e.cost());
            }
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::Graph;

    #[test]
    fn test_undirected_lookup() {
        let g = Graph::from_weighted_edges(3, &[(0, 1, 4), (1, 2, 7)], false);

        assert_eq!(g.weight(0, 1), Some(4));
        assert_eq!(g.weight(1, 0), Some(4));
        assert_eq!(g.weight(0, 2), None);
        assert_eq!(g.total_weight(), 11);
        assert!(g.is_weighted());
    }

    #[test]
    fn test_directed_lookup() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)], true);

        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.edge_cost(1, 2), Some(1));
        assert!(!g.is_weighted());
    }

    #[test]
    fn test_duplicate_edge_overwrites() {
        let mut g = Graph::new(2, false);
        g.add_edge(0, 1, Some(3));
        g.add_edge(1, 0, Some(5));

        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.weight(0, 1), Some(5));
    }

    #[test]
    fn test_relabel_keeps_degrees() {
        let g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)], false);
        let h = g.relabel(&[3, 2, 1, 0]).unwrap();

        assert_eq!(h.edges()[0].source, 3);
        assert_eq!(h.edges()[0].target, 2);
        assert_eq!(g.degree_sequence(), h.degree_sequence());
        assert_eq!(h.degrees(), vec![1, 1, 1, 3]);
    }

    #[test]
    fn test_relabel_rejects_non_bijection() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)], false);

        assert!(g.relabel(&[0, 1]).is_none());
        assert!(g.relabel(&[0, 1, 1]).is_none());
        assert!(g.relabel(&[0, 1, 3]).is_none());
        assert!(g.relabel(&[2, 0, 1]).is_some());
    }

    #[test]
    fn test_petgraph_view() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)], false);
        let pg = g.to_petgraph();

        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 4);
    }
}
