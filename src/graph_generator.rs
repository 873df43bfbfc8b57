//! # Graph Generator
//!
//! Builds test graphs from a fixed catalog of parametric families. Each family is an edge-list
//! function of the vertex count alone; a vertex count too small for the family gives an empty
//! edge list, which the generator reports as `None`.
//!
//! Families:
//! - path, star, cycle, complete
//! - tree (binary heap layout), single cycle, multiple cycle
//! - bipartite, wheel
//! - random (G(n, 0.30) with a fixed seed)
//! - regular and friendship are catalogued but never built

use crate::error::QuboError;
use crate::graph::Graph;
use crate::options::GeneratorOptions;
use crate::utils::{random_permutation, seeded_prng, uniform_int};
use smolprng::{Algorithm, PRNG};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Edge probability of the random family.
pub const RANDOM_EDGE_PROBABILITY: f64 = 0.30;

/// Seed of the random family, fixed so benchmark graphs are the same across runs.
pub const RANDOM_GRAPH_SEED: u64 = 42;

/// Inclusive range of the random edge weights.
pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphFamily {
    Path,
    Star,
    Cycle,
    Complete,
    Tree,
    SingleCycle,
    MultipleCycle,
    Bipartite,
    Regular,
    Wheel,
    Friendship,
    Random,
}

impl GraphFamily {
    pub const ALL: [Self; 12] = [
        Self::Path,
        Self::Star,
        Self::Cycle,
        Self::Complete,
        Self::Tree,
        Self::SingleCycle,
        Self::MultipleCycle,
        Self::Bipartite,
        Self::Regular,
        Self::Wheel,
        Self::Friendship,
        Self::Random,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Path => "path graph",
            Self::Star => "star graph",
            Self::Cycle => "cycle graph",
            Self::Complete => "complete graph",
            Self::Tree => "tree graph",
            Self::SingleCycle => "single cycle graph",
            Self::MultipleCycle => "multiple cycle graph",
            Self::Bipartite => "bipartite graph",
            Self::Regular => "regular graph",
            Self::Wheel => "wheel graph",
            Self::Friendship => "friendship graph",
            Self::Random => "random graph",
        }
    }

    /// Smallest vertex count the family is built for, `None` for families that are never built.
    pub const fn min_vertices(self) -> Option<usize> {
        match self {
            Self::Path | Self::Star | Self::Complete | Self::Tree | Self::Bipartite => Some(2),
            Self::Cycle => Some(3),
            Self::SingleCycle | Self::Wheel => Some(4),
            Self::MultipleCycle => Some(5),
            Self::Random => Some(0),
            Self::Regular | Self::Friendship => None,
        }
    }

    /// The edge list of the family on `vertices` nodes. Empty means unsupported. The random
    /// family has no fixed edge list and always returns empty here.
    pub fn edges(self, vertices: usize) -> Vec<(usize, usize)> {
        match self {
            Self::Path => graph_path(vertices),
            Self::Star => graph_star(vertices),
            Self::Cycle => graph_cycle(vertices),
            Self::Complete => graph_complete(vertices),
            Self::Tree => graph_tree(vertices),
            Self::SingleCycle => graph_single_cycle(vertices),
            Self::MultipleCycle => graph_multiple_cycle(vertices),
            Self::Bipartite => graph_bipartite(vertices),
            Self::Regular => graph_regular(vertices),
            Self::Wheel => graph_wheel(vertices),
            Self::Friendship => graph_friendship(vertices),
            Self::Random => Vec::new(),
        }
    }
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphFamily {
    type Err = QuboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.name() == name || family.name().trim_end_matches(" graph") == name)
            .ok_or_else(|| QuboError::UnknownFamily(s.to_string()))
    }
}

/// Output of the generator, a single graph or a graph with a relabeled twin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedGraph {
    Single(Graph),
    Permuted(Graph, Graph),
}

impl GeneratedGraph {
    /// The generated graph, dropping the twin if there is one.
    pub fn into_graph(self) -> Graph {
        match self {
            Self::Single(g) | Self::Permuted(g, _) => g,
        }
    }

    pub fn into_pair(self) -> Option<(Graph, Graph)> {
        match self {
            Self::Single(_) => None,
            Self::Permuted(g, gp) => Some((g, gp)),
        }
    }
}

/// Builds a graph of the given family. Weights and the relabeling are drawn from `prng`, the
/// random family's structure always comes from its own fixed seed.
///
/// Returns `None` when the family cannot be built at this size.
///
/// Example:
/// ```rust
/// use graph_qubo::graph_generator::{create_graph, GraphFamily};
/// use graph_qubo::options::GeneratorOptions;
/// use graph_qubo::utils::seeded_prng;
///
/// let mut prng = seeded_prng(0);
/// let opts = GeneratorOptions::new().weighted(true);
/// let g = create_graph(GraphFamily::Cycle, 5, &opts, &mut prng).unwrap().into_graph();
/// assert_eq!(g.num_edges(), 5);
/// ```
pub fn create_graph<T: Algorithm>(
    family: GraphFamily,
    vertices: usize,
    options: &GeneratorOptions,
    prng: &mut PRNG<T>,
) -> Option<GeneratedGraph> {
    let mut graph = match family {
        GraphFamily::Random => graph_random(vertices, options.directed),
        _ => {
            let edges = family.edges(vertices);
            if edges.is_empty() {
                warn!(family = %family, vertices, "graph family not available at this size");
                return None;
            }
            Graph::from_edges(vertices, &edges, options.directed)
        }
    };

    if options.weighted {
        graph = assign_random_weights(&graph, prng);
    }

    debug!(
        family = %family,
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "generated graph"
    );

    if options.permuted {
        let mapping = random_permutation(graph.num_nodes(), prng);
        let twin = graph.relabel(&mapping)?;
        Some(GeneratedGraph::Permuted(graph, twin))
    } else {
        Some(GeneratedGraph::Single(graph))
    }
}

/// Gives every edge an independent uniform weight in [MIN_WEIGHT, MAX_WEIGHT].
pub fn assign_random_weights<T: Algorithm>(graph: &Graph, prng: &mut PRNG<T>) -> Graph {
    let mut weighted = Graph::new(graph.num_nodes(), graph.is_directed());
    for e in graph.edges() {
        let w = uniform_int(MIN_WEIGHT, MAX_WEIGHT, prng);
        weighted.add_edge(e.source, e.target, Some(w));
    }
    weighted
}

/// G(n, p) with p = RANDOM_EDGE_PROBABILITY and a fixed seed. Undirected graphs try each pair
/// i < j once, directed graphs try every ordered pair.
pub fn graph_random(vertices: usize, directed: bool) -> Graph {
    let mut prng = seeded_prng(RANDOM_GRAPH_SEED);
    let mut graph = Graph::new(vertices, directed);

    for i in 0..vertices {
        for j in 0..vertices {
            if i == j || (!directed && j < i) {
                continue;
            }
            if prng.gen_f64() < RANDOM_EDGE_PROBABILITY {
                graph.add_edge(i, j, None);
            }
        }
    }

    graph
}

pub fn graph_path(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 2 {
        return Vec::new();
    }
    (0..vertices - 1).map(|i| (i, i + 1)).collect()
}

pub fn graph_star(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 2 {
        return Vec::new();
    }
    (1..vertices).map(|i| (0, i)).collect()
}

pub fn graph_cycle(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 3 {
        return Vec::new();
    }
    let mut edges = graph_path(vertices);
    edges.push((vertices - 1, 0));
    edges
}

pub fn graph_complete(vertices: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for i in 0..vertices {
        for j in i + 1..vertices {
            edges.push((i, j));
        }
    }
    edges
}

/// Balanced binary tree in heap layout, vertex i has children 2i + 1 and 2i + 2.
pub fn graph_tree(vertices: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    if vertices < 2 {
        return edges;
    }
    for i in 0..vertices {
        for child in [2 * i + 1, 2 * i + 2] {
            if child < vertices {
                edges.push((i, child));
            }
        }
    }
    edges
}

/// Tree with one extra edge from the last vertex back to the root.
pub fn graph_single_cycle(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 4 {
        return Vec::new();
    }
    let mut edges = graph_tree(vertices);
    edges.push((vertices - 1, 0));
    edges
}

/// Tree with an edge back to the root from every second vertex of the last level.
pub fn graph_multiple_cycle(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 5 {
        return Vec::new();
    }
    let mut edges = graph_tree(vertices);

    // first index of the last level
    let mut level_size = 1;
    let mut last_level = 0;
    while last_level + level_size < vertices {
        last_level += level_size;
        level_size *= 2;
    }

    for i in (last_level..vertices).step_by(2) {
        edges.push((i, 0));
    }

    // with five vertices the last level only holds vertex 3, give it a second cycle
    if vertices == 5 {
        edges.push((4, 0));
    }
    edges
}

/// Even vertices on one side, odd on the other. Vertex 2i is joined to 2i + 1, 2i - 1,
/// 2i + 3 and 2i - 3 where those exist.
pub fn graph_bipartite(vertices: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    if vertices < 2 {
        return edges;
    }
    for i in 0..(vertices + 1) / 2 {
        let v = 2 * i;
        if v + 3 < vertices {
            edges.push((v, v + 3));
        }
        if v + 1 < vertices {
            edges.push((v, v + 1));
        }
        if v > 1 {
            edges.push((v, v - 1));
        }
        if v > 3 {
            edges.push((v, v - 3));
        }
    }
    edges
}

pub fn graph_regular(_vertices: usize) -> Vec<(usize, usize)> {
    Vec::new()
}

/// Cycle on the first n - 1 vertices with the last vertex as the hub.
pub fn graph_wheel(vertices: usize) -> Vec<(usize, usize)> {
    if vertices < 4 {
        return Vec::new();
    }
    let hub = vertices - 1;
    let mut edges = graph_cycle(hub);
    edges.extend((0..hub).map(|i| (hub, i)));
    edges
}

pub fn graph_friendship(_vertices: usize) -> Vec<(usize, usize)> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GeneratorOptions {
        GeneratorOptions::new().weighted(true).directed(false)
    }

    #[test]
    fn test_supported_families_have_edges() {
        let mut prng = seeded_prng(1);
        for family in GraphFamily::ALL {
            let Some(min) = family.min_vertices() else {
                continue;
            };
            if family == GraphFamily::Random {
                continue;
            }
            for n in min..min + 8 {
                let g = create_graph(family, n, &opts(), &mut prng)
                    .unwrap_or_else(|| panic!("{family} on {n} vertices"))
                    .into_graph();
                assert_eq!(g.num_nodes(), n);
                assert!(g.num_edges() > 0);
            }
        }
    }

    #[test]
    fn test_below_minimum_is_none() {
        let mut prng = seeded_prng(1);
        for family in GraphFamily::ALL {
            if let Some(min) = family.min_vertices() {
                if min > 0 {
                    assert!(create_graph(family, min - 1, &opts(), &mut prng).is_none());
                }
            }
        }
    }

    #[test]
    fn test_unimplemented_families() {
        let mut prng = seeded_prng(1);
        for n in 0..12 {
            for family in [GraphFamily::Regular, GraphFamily::Friendship] {
                assert!(family.edges(n).is_empty());
                let permuted = opts().permuted(true);
                assert!(create_graph(family, n, &permuted, &mut prng).is_none());
            }
        }
    }

    #[test]
    fn test_edge_lists() {
        assert_eq!(graph_path(4), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph_star(4), vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(graph_cycle(3), vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(graph_complete(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(graph_tree(5), vec![(0, 1), (0, 2), (1, 3), (1, 4)]);
        assert_eq!(
            graph_multiple_cycle(5),
            vec![(0, 1), (0, 2), (1, 3), (1, 4), (3, 0), (4, 0)]
        );
        assert_eq!(graph_bipartite(4), vec![(0, 3), (0, 1), (2, 3), (2, 1)]);
        assert_eq!(
            graph_wheel(4),
            vec![(0, 1), (1, 2), (2, 0), (3, 0), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn test_weights_in_range() {
        let mut prng = seeded_prng(5);
        let g = create_graph(GraphFamily::Complete, 8, &opts(), &mut prng)
            .unwrap()
            .into_graph();

        assert!(g.is_weighted());
        for e in g.edges() {
            let w = e.weight.unwrap();
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&w));
        }
    }

    #[test]
    fn test_permuted_twin_structure() {
        let mut prng = seeded_prng(9);
        let permuted = opts().permuted(true);
        let (g, gp) = create_graph(GraphFamily::Tree, 10, &permuted, &mut prng)
            .unwrap()
            .into_pair()
            .unwrap();

        assert_eq!(g.num_nodes(), gp.num_nodes());
        assert_eq!(g.num_edges(), gp.num_edges());
        assert_eq!(g.degree_sequence(), gp.degree_sequence());

        // every vertex of the tree is an endpoint, only the identity keeps all edge tuples
        let ends = |g: &Graph| {
            g.edges()
                .iter()
                .map(|e| (e.source, e.target))
                .collect::<Vec<_>>()
        };
        assert_ne!(ends(&g), ends(&gp));
    }

    #[test]
    fn test_random_family_is_reproducible() {
        let a = create_graph(GraphFamily::Random, 12, &opts(), &mut seeded_prng(1))
            .unwrap()
            .into_graph();
        let b = create_graph(GraphFamily::Random, 12, &opts(), &mut seeded_prng(2))
            .unwrap()
            .into_graph();

        let ends = |g: &Graph| {
            g.edges()
                .iter()
                .map(|e| (e.source, e.target))
                .collect::<Vec<_>>()
        };
        assert_eq!(a.num_nodes(), 12);
        assert!(a.num_edges() > 0);
        assert_eq!(ends(&a), ends(&b));
    }

    #[test]
    fn test_random_family_sizes() {
        let mut prng = seeded_prng(3);
        for n in [12, 16] {
            for directed in [false, true] {
                let opts = GeneratorOptions::new().directed(directed);
                let g = create_graph(GraphFamily::Random, n, &opts, &mut prng)
                    .unwrap()
                    .into_graph();

                assert_eq!(g.num_nodes(), n);
                assert!(g.num_edges() > 0);
                assert_eq!(g.is_directed(), directed);
                assert!(g.edges().iter().all(|e| e.source != e.target));
            }
        }
    }

    #[test]
    fn test_family_names() {
        assert_eq!("path graph".parse::<GraphFamily>(), Ok(GraphFamily::Path));
        assert_eq!("Wheel".parse::<GraphFamily>(), Ok(GraphFamily::Wheel));
        assert_eq!(
            "geometric graph".parse::<GraphFamily>(),
            Err(QuboError::UnknownFamily("geometric graph".to_string()))
        );
    }
}
