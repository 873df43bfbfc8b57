//! QUBO formulations of graph problems, and checkers for annealer results.
//!
//! Three pipelines share the same shape: generate a graph, encode it as a QUBO, hand the QUBO to
//! an annealer, then decode and check what came back.
//!
//! - all pairs shortest path: [`encoders::create_qubo_apsp`], [`check_result::check_result_apsp`]
//! - community detection: [`encoders::create_qubo_cd`], [`check_result::check_result_cd`]
//! - graph isomorphism: [`encoders::create_qubo_gi`], [`check_result::check_result_gi`]

pub mod check_result;
pub mod constraint;
pub mod encoders;
pub mod error;
pub mod graph;
pub mod graph_generator;
pub mod graph_utils;
pub mod options;
pub mod qubo;
pub mod result_logger;
pub mod sampleset;
pub mod utils;
pub mod variables;

#[cfg(feature = "python")]
mod python_interopt;

pub use error::QuboError;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module, built with the `python` feature.
#[cfg(feature = "python")]
#[pymodule]
fn graph_qubo(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python_interopt::create_graph, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::create_qubo_apsp, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::create_qubo_cd, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::create_qubo_gi, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::check_result_apsp, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::check_result_cd, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::check_result_gi, m)?)?;
    Ok(())
}
