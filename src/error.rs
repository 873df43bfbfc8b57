//! Error type shared by the encoders, the generator catalog and the validators.

use thiserror::Error;

/// Errors raised when an input cannot be turned into a QUBO or checked against ground truth.
///
/// Degenerate but well-formed inputs (a family that cannot be built at a given size, a sample
/// that does not decode) are not errors, they come back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuboError {
    #[error("unknown graph family: {0}")]
    UnknownFamily(String),

    #[error("graph must carry edge weights")]
    UnweightedGraph,

    #[error("graph must be undirected")]
    DirectedGraph,

    #[error("graph has no edge weight to normalise against")]
    EmptyGraph,

    #[error("community count must be at least 1, got {0}")]
    InvalidCommunityCount(usize),

    #[error("vertex counts differ: {left} vs {right}")]
    VertexCountMismatch { left: usize, right: usize },

    #[error("sample set is empty")]
    EmptySampleSet,

    #[error("sample has {got} variables, expected {expected}")]
    SampleSizeMismatch { expected: usize, got: usize },

    #[error("invalid variable label: {0}")]
    InvalidLabel(String),
}
