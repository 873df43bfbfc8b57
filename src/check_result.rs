//! # Result decoding and validation
//!
//! Turns annealer samples back into graph objects and scores them against classical ground truth:
//!
//! - shortest paths: decode one path per sample, keep the best per vertex pair, compare with every
//!   minimum weight path
//! - isomorphism: energy gap to the known optimum, and mapping decoding
//! - community detection: decode a partition and compare its modularity with a greedy baseline

use crate::constraint::{Constraint, ConstraintType};
use crate::error::QuboError;
use crate::graph::Graph;
use crate::graph_utils::{
    greedy_modularity_communities, modularity, path_weight, shortest_paths_from,
};
use crate::options::CheckOptions;
use crate::result_logger::ResultLogger;
use crate::sampleset::{Sample, SampleSet};
use crate::variables::Variable;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// A path read out of a sample, keyed by `"<source>-<target>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    pub key: String,
    pub path: Vec<usize>,
    pub weight: u64,
}

/// Decoded paths per `"<source>-<target>"` key.
pub type ResultPaths = BTreeMap<String, (Vec<usize>, u64)>;

/// Parses an edge label `"<x>-<y>"`.
pub fn xy_from_label(label: &str) -> Option<(usize, usize)> {
    match label.parse::<Variable>() {
        Ok(Variable::Edge(x, y)) => Some((x, y)),
        _ => None,
    }
}

/// Reads the path a sample encodes.
///
/// Source and target are the last `s<v>` and `t<v>` set in the sample, vertex 0 when none is.
/// From the source, the walk repeatedly follows the first selected edge leaving the current
/// vertex until it reaches the target. Returns `None` if source and target coincide, if the walk
/// gets stuck, or if it runs longer than there are edges.
pub fn path_from_sample(set: &SampleSet, sample: &Sample, graph: &Graph) -> Option<DecodedPath> {
    let mut s = 0;
    let mut t = 0;
    for v in graph.nodes() {
        if set.value(sample, &Variable::Source(v)) == Some(1) {
            s = v;
        }
        if set.value(sample, &Variable::Target(v)) == Some(1) {
            t = v;
        }
    }

    if s == t {
        return None;
    }

    let selected: Vec<(usize, usize)> = set
        .labels()
        .iter()
        .enumerate()
        .filter(|&(i, _)| sample.is_set(i))
        .filter_map(|(_, label)| match *label {
            Variable::Edge(x, y) => Some((x, y)),
            _ => None,
        })
        .collect();

    let mut current = s;
    let mut path = vec![s];
    let mut weight = 0;

    while current != t {
        if path.len() > selected.len() {
            return None;
        }
        let &(x, y) = selected.iter().find(|&&(x, _)| x == current)?;
        weight += graph.edge_cost(x, y)?;
        path.push(y);
        current = y;
    }

    Some(DecodedPath {
        key: format!("{s}-{t}"),
        path,
        weight,
    })
}

/// The first decodable path for every source-target pair, over the negative energy samples in
/// energy order. Samples with non-negative energy are never feasible paths and are skipped.
pub fn result_paths(set: &SampleSet, graph: &Graph) -> ResultPaths {
    let mut res = ResultPaths::new();

    for sample in set.filter(|s| s.energy < 0.0).iter() {
        match path_from_sample(set, sample, graph) {
            Some(decoded) => {
                res.entry(decoded.key)
                    .or_insert((decoded.path, decoded.weight));
            }
            None => trace!(energy = sample.energy, "sample does not decode to a path"),
        }
    }

    res
}

/// Success count of a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub ok: usize,
    pub total: usize,
}

impl CheckSummary {
    /// Truncated percentage of successes, 100 when there was nothing to check.
    pub fn percentage(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        100 * self.ok / self.total
    }
}

/// Counts the vertex pairs whose decoded path is one of the shortest paths with the right weight.
pub fn summarize_apsp(graph: &Graph, set: &SampleSet, logger: &ResultLogger) -> CheckSummary {
    let res = result_paths(set, graph);
    let mut summary = CheckSummary { ok: 0, total: 0 };

    for i in graph.nodes() {
        // one dijkstra per source, unreachable targets have no entry
        for (j, shortest) in shortest_paths_from(graph, i) {
            summary.total += 1;

            let w1 = shortest.first().and_then(|p| path_weight(graph, p));
            let key = format!("{i}-{j}");
            let found = res.get(&key);

            let ok = found.is_some_and(|(path, w2)| shortest.contains(path) && w1 == Some(*w2));
            if ok {
                summary.ok += 1;
            }
            logger.output_pair(&key, &shortest, found.map(|(p, _)| p.as_slice()), ok);
        }
    }

    summary
}

/// Checks a shortest path sample set against the graph and returns the success percentage,
/// truncated, as a string. Prints `ok / total`.
pub fn check_result_apsp(graph: &Graph, set: &SampleSet, options: &CheckOptions) -> String {
    let logger = ResultLogger::new(options.verbose);
    logger.output_header("APSP", graph.num_nodes(), graph.num_edges(), set.len());

    let summary = summarize_apsp(graph, set, &logger);
    logger.output_count(summary.ok, summary.total);

    summary.percentage().to_string()
}

/// Gap between the best sample energy, truncated to an integer, and the expected optimum.
///
/// # Errors
///
/// Returns `QuboError::EmptySampleSet` if there is no sample.
pub fn check_result_gi(set: &SampleSet, expected: i64) -> Result<String, QuboError> {
    let best = set.first().ok_or(QuboError::EmptySampleSet)?;
    Ok((best.energy.trunc() as i64 - expected).to_string())
}

/// Same as [`check_result_gi`], printing the energies.
///
/// # Errors
///
/// Returns `QuboError::EmptySampleSet` if there is no sample.
pub fn check_result_gi_logged(
    set: &SampleSet,
    expected: i64,
    options: &CheckOptions,
) -> Result<String, QuboError> {
    let gap = check_result_gi(set, expected)?;
    if let Some(best) = set.first() {
        ResultLogger::new(options.verbose).output_energy_gap(best.energy, expected);
    }
    Ok(gap)
}

// position of every label in the sample set, samplers are free to reorder variables
fn label_positions(set: &SampleSet) -> HashMap<Variable, usize> {
    set.labels()
        .iter()
        .enumerate()
        .map(|(i, &label)| (label, i))
        .collect()
}

// the sample positions of a group of variables, `None` if one is missing from the labels
fn group(
    positions: &HashMap<Variable, usize>,
    vars: impl Iterator<Item = Variable>,
    constraint_type: ConstraintType,
) -> Option<Constraint> {
    let vars = vars
        .map(|var| positions.get(&var).copied())
        .collect::<Option<Vec<usize>>>()?;
    Some(Constraint::new(vars, constraint_type))
}

/// Reads a vertex mapping out of an isomorphism sample, `mapping[source] = target`. Variables
/// are looked up by their `s->t` labels. `None` unless every source has exactly one target and
/// every target exactly one source.
pub fn mapping_from_sample(
    set: &SampleSet,
    sample: &Sample,
    vertices: usize,
) -> Option<Vec<usize>> {
    mapping_with_positions(&label_positions(set), sample, vertices)
}

fn mapping_with_positions(
    positions: &HashMap<Variable, usize>,
    sample: &Sample,
    vertices: usize,
) -> Option<Vec<usize>> {
    let var = |source: usize, target: usize| Variable::Mapping { source, target };
    let mut mapping = Vec::with_capacity(vertices);

    for s in 0..vertices {
        let row = (0..vertices).map(|t| var(s, t));
        let row = group(positions, row, ConstraintType::ExactlyOne)?;
        if !row.check(sample) {
            return None;
        }
        mapping.push(row.first_set(sample)?);
    }

    // every row holds exactly one, so at most one per column makes it a permutation
    for t in 0..vertices {
        let column = (0..vertices).map(|s| var(s, t));
        let column = group(positions, column, ConstraintType::AtMostOne)?;
        if !column.check(sample) {
            return None;
        }
    }

    Some(mapping)
}

/// True if `mapping` is a bijection carrying the edges of `g1` exactly onto the edges of `g2`.
pub fn is_isomorphism(g1: &Graph, g2: &Graph, mapping: &[usize]) -> bool {
    let n = g1.num_nodes();
    if g2.num_nodes() != n || g1.num_edges() != g2.num_edges() || mapping.len() != n {
        return false;
    }

    let mut seen = vec![false; n];
    for &t in mapping {
        if t >= n || seen[t] {
            return false;
        }
        seen[t] = true;
    }

    g1.edges()
        .iter()
        .all(|e| g2.has_edge(mapping[e.source], mapping[e.target]))
}

/// Reads a partition out of a community sample, `partition[v]` is the community of v. Variables
/// are looked up by their `(v,c)` labels. `None` unless every vertex is in exactly one community.
pub fn communities_from_sample(
    set: &SampleSet,
    sample: &Sample,
    vertices: usize,
    communities: usize,
) -> Option<Vec<usize>> {
    communities_with_positions(&label_positions(set), sample, vertices, communities)
}

fn communities_with_positions(
    positions: &HashMap<Variable, usize>,
    sample: &Sample,
    vertices: usize,
    communities: usize,
) -> Option<Vec<usize>> {
    (0..vertices)
        .map(|vertex| {
            let vars = (0..communities).map(|community| Variable::Community { vertex, community });
            let membership = group(positions, vars, ConstraintType::ExactlyOne)?;
            if membership.check(sample) {
                membership.first_set(sample)
            } else {
                None
            }
        })
        .collect()
}

/// Scores the best valid community sample against the greedy modularity baseline with at most
/// `communities` communities. Returns the truncated ratio of the two modularities as a
/// percentage, which can exceed 100 when the sample beats the baseline.
///
/// The first negative energy sample that decodes to a partition is scored. If none does the
/// result is "0". If the baseline is not positive the result is "100" when the sample is at least
/// as good and "0" otherwise.
///
/// # Errors
///
/// Returns `QuboError::InvalidCommunityCount` if `communities` is 0.
pub fn check_result_cd(
    graph: &Graph,
    set: &SampleSet,
    communities: usize,
    options: &CheckOptions,
) -> Result<String, QuboError> {
    if communities == 0 {
        return Err(QuboError::InvalidCommunityCount(communities));
    }

    let logger = ResultLogger::new(options.verbose);
    logger.output_header("CD", graph.num_nodes(), graph.num_edges(), set.len());

    let positions = label_positions(set);
    let partition = set
        .iter()
        .filter(|s| s.energy < 0.0)
        .find_map(|s| communities_with_positions(&positions, s, graph.num_nodes(), communities));

    let baseline = modularity(graph, &greedy_modularity_communities(graph, communities));
    let sample_q = partition.map(|p| modularity(graph, &p));
    logger.output_modularity(sample_q, baseline);

    let Some(q) = sample_q else {
        return Ok("0".to_string());
    };

    let score = if baseline <= 0.0 {
        if q >= baseline {
            100
        } else {
            0
        }
    } else {
        (100.0 * q / baseline).floor().max(0.0) as i64
    };

    Ok(score.to_string())
}
