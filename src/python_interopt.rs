//! Acts as the interface to rust code from python. Graphs cross the boundary as
//! `(num_nodes, edges, directed)` tuples and QUBOs as `(rows, cols, values, num_x, labels)`, which
//! is what an annealer's sampler wants.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ndarray::Array1;

use crate::check_result;
use crate::encoders;
use crate::error::QuboError;
use crate::graph::Graph;
use crate::graph_generator::{self, GeneratedGraph, GraphFamily};
use crate::options::{CheckOptions, GeneratorOptions};
use crate::qubo::Qubo;
use crate::sampleset::SampleSet;
use crate::utils::seeded_prng;
use crate::variables::Variable;

// type alias for the graph data object from python
type GraphData = (usize, Vec<(usize, usize, Option<u32>)>, bool);

// type alias for the qubo data object handed to python
type QuboData = (Vec<usize>, Vec<usize>, Vec<f64>, usize, Vec<String>);

// (assignment, energy) pairs as returned by a sampler
type SampleData = Vec<(Vec<usize>, f64)>;

impl From<QuboError> for PyErr {
    fn from(err: QuboError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn graph_from_data(data: GraphData) -> Graph {
    let (num_nodes, edges, directed) = data;
    let mut graph = Graph::new(num_nodes, directed);
    for (u, v, w) in edges {
        graph.add_edge(u, v, w);
    }
    graph
}

fn graph_to_data(graph: &Graph) -> GraphData {
    let edges = graph
        .edges()
        .iter()
        .map(|e| (e.source, e.target, e.weight))
        .collect();
    (graph.num_nodes(), edges, graph.is_directed())
}

fn qubo_to_data(qubo: &Qubo) -> QuboData {
    let (rows, cols, values, num_x) = qubo.to_vec();
    let labels = qubo.labels.iter().map(ToString::to_string).collect();
    (rows, cols, values, num_x, labels)
}

fn sample_set_from_data(labels: Vec<String>, samples: SampleData) -> Result<SampleSet, QuboError> {
    let labels = labels
        .iter()
        .map(|l| l.parse::<Variable>())
        .collect::<Result<Vec<_>, _>>()?;
    let samples = samples
        .into_iter()
        .map(|(x, energy)| (Array1::from(x), energy))
        .collect();
    SampleSet::from_weighted(labels, samples)
}

/// Builds a graph from the catalog, returns the graph and, if permuted, its relabeled twin.
/// Returns `None` if the family cannot be built at this size.
///
/// Example
/// ``` python
/// import graph_qubo
///
/// g, twin = graph_qubo.create_graph("cycle", 5, weighted=True)
/// ```
///
/// # Errors
///
/// If the family name is not in the catalog.
#[pyfunction]
#[pyo3(signature = (family, vertices, weighted=None, directed=None, permuted=None, seed=None))]
pub fn create_graph(
    family: String,
    vertices: usize,
    weighted: Option<bool>,
    directed: Option<bool>,
    permuted: Option<bool>,
    seed: Option<u64>,
) -> PyResult<Option<(GraphData, Option<GraphData>)>> {
    let family = family.parse::<GraphFamily>()?;

    let mut options = GeneratorOptions::new();
    options.set_flag(Some("weighted".to_string()), weighted.unwrap_or(false));
    options.set_flag(Some("directed".to_string()), directed.unwrap_or(true));
    options.set_flag(Some("permuted".to_string()), permuted.unwrap_or(false));

    let mut prng = seeded_prng(seed.unwrap_or(0));

    let Some(generated) = graph_generator::create_graph(family, vertices, &options, &mut prng)
    else {
        return Ok(None);
    };

    Ok(Some(match generated {
        GeneratedGraph::Single(g) => (graph_to_data(&g), None),
        GeneratedGraph::Permuted(g, twin) => (graph_to_data(&g), Some(graph_to_data(&twin))),
    }))
}

/// Encodes the all pairs shortest path problem of a weighted graph.
///
/// Example
/// ``` python
/// import graph_qubo
///
/// g, _ = graph_qubo.create_graph("path", 4, weighted=True)
/// rows, cols, values, num_x, labels = graph_qubo.create_qubo_apsp(g)
/// ```
///
/// # Errors
///
/// If the graph is unweighted.
#[pyfunction]
#[pyo3(signature = (graph,))]
pub fn create_qubo_apsp(graph: GraphData) -> PyResult<QuboData> {
    let p = encoders::create_qubo_apsp(&graph_from_data(graph))?;
    Ok(qubo_to_data(&p))
}

/// Encodes community detection into `communities` groups.
///
/// # Errors
///
/// If the graph is unweighted, directed or has no edges, or `communities` is 0.
#[pyfunction]
#[pyo3(signature = (graph, communities))]
pub fn create_qubo_cd(graph: GraphData, communities: usize) -> PyResult<QuboData> {
    let p = encoders::create_qubo_cd(&graph_from_data(graph), communities)?;
    Ok(qubo_to_data(&p))
}

/// Encodes isomorphism between two graphs, returns the QUBO and the energy of an isomorphism.
///
/// # Errors
///
/// If the vertex counts differ.
#[pyfunction]
#[pyo3(signature = (g1, g2))]
pub fn create_qubo_gi(g1: GraphData, g2: GraphData) -> PyResult<(QuboData, i64)> {
    let g1 = graph_from_data(g1);
    let p = encoders::create_qubo_gi(&g1, &graph_from_data(g2))?;
    Ok((
        qubo_to_data(&p),
        encoders::isomorphism::expected_gi_energy(&g1),
    ))
}

/// Percentage of reachable pairs whose decoded path is a shortest path.
///
/// # Errors
///
/// If a label cannot be parsed or a sample does not match the labels.
#[pyfunction]
#[pyo3(signature = (graph, labels, samples, verbose=None))]
pub fn check_result_apsp(
    graph: GraphData,
    labels: Vec<String>,
    samples: SampleData,
    verbose: Option<usize>,
) -> PyResult<String> {
    let set = sample_set_from_data(labels, samples)?;
    let options = CheckOptions {
        verbose: verbose.unwrap_or(1),
    };
    Ok(check_result::check_result_apsp(
        &graph_from_data(graph),
        &set,
        &options,
    ))
}

/// Modularity of the best valid partition relative to the greedy baseline, as a percentage.
///
/// # Errors
///
/// If a label cannot be parsed, a sample does not match the labels or `communities` is 0.
#[pyfunction]
#[pyo3(signature = (graph, labels, samples, communities, verbose=None))]
pub fn check_result_cd(
    graph: GraphData,
    labels: Vec<String>,
    samples: SampleData,
    communities: usize,
    verbose: Option<usize>,
) -> PyResult<String> {
    let set = sample_set_from_data(labels, samples)?;
    let options = CheckOptions {
        verbose: verbose.unwrap_or(1),
    };
    Ok(check_result::check_result_cd(
        &graph_from_data(graph),
        &set,
        communities,
        &options,
    )?)
}

/// Gap between the best energy and the energy of an isomorphism.
///
/// # Errors
///
/// If the sample set is empty or does not match the labels.
#[pyfunction]
#[pyo3(signature = (labels, samples, expected, verbose=None))]
pub fn check_result_gi(
    labels: Vec<String>,
    samples: SampleData,
    expected: i64,
    verbose: Option<usize>,
) -> PyResult<String> {
    let set = sample_set_from_data(labels, samples)?;
    let options = CheckOptions {
        verbose: verbose.unwrap_or(1),
    };
    Ok(check_result::check_result_gi_logged(
        &set, expected, &options,
    )?)
}
