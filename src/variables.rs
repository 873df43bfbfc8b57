//! Binary decision variables and the bijections between them and flat QUBO indices.
//!
//! Each encoder lays its variables out in one flat index space:
//!
//! - APSP: `s<v>` at `v`, `t<v>` at `n + v`, edge `<x>-<y>` at `2n + position in the edge list`
//! - community detection: `(v, c)` at `v * communities + c`
//! - isomorphism: `source -> target` at `source * n + target`
//!
//! The decoders use the inverse maps, so encoder and decoder can never disagree on a layout.

use crate::error::QuboError;
use crate::graph::Graph;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// `s<v>`: v is the path source
    Source(usize),
    /// `t<v>`: v is the path target
    Target(usize),
    /// `<x>-<y>`: the edge x -> y is on the path
    Edge(usize, usize),
    /// `(<vertex>,<community>)`: vertex belongs to community
    Community { vertex: usize, community: usize },
    /// `<source>-><target>`: source vertex maps to target vertex
    Mapping { source: usize, target: usize },
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(v) => write!(f, "s{v}"),
            Self::Target(v) => write!(f, "t{v}"),
            Self::Edge(x, y) => write!(f, "{x}-{y}"),
            Self::Community { vertex, community } => write!(f, "({vertex},{community})"),
            Self::Mapping { source, target } => write!(f, "{source}->{target}"),
        }
    }
}

impl FromStr for Variable {
    type Err = QuboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || QuboError::InvalidLabel(s.to_string());
        let num = |t: &str| t.trim().parse::<usize>().map_err(|_| err());

        if let Some(v) = s.strip_prefix('s') {
            return Ok(Self::Source(num(v)?));
        }
        if let Some(v) = s.strip_prefix('t') {
            return Ok(Self::Target(num(v)?));
        }
        if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            let (vertex, community) = inner.split_once(',').ok_or_else(err)?;
            return Ok(Self::Community {
                vertex: num(vertex)?,
                community: num(community)?,
            });
        }
        if let Some((source, target)) = s.split_once("->") {
            return Ok(Self::Mapping {
                source: num(source)?,
                target: num(target)?,
            });
        }
        if let Some((x, y)) = s.split_once('-') {
            return Ok(Self::Edge(num(x)?, num(y)?));
        }

        Err(err())
    }
}

/// Index layout of the APSP encoding for one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApspIndex {
    num_nodes: usize,
    edges: Vec<(usize, usize)>,
}

impl ApspIndex {
    pub fn new(graph: &Graph) -> Self {
        Self {
            num_nodes: graph.num_nodes(),
            edges: graph.edges().iter().map(|e| (e.source, e.target)).collect(),
        }
    }

    /// Size of the variable space, 2n + m.
    pub fn num_x(&self) -> usize {
        2 * self.num_nodes + self.edges.len()
    }

    pub const fn source(&self, v: usize) -> usize {
        v
    }

    pub const fn target(&self, v: usize) -> usize {
        self.num_nodes + v
    }

    /// Index of the i-th edge of the edge list.
    pub const fn edge(&self, i: usize) -> usize {
        2 * self.num_nodes + i
    }

    pub fn index_of(&self, var: &Variable) -> Option<usize> {
        match *var {
            Variable::Source(v) if v < self.num_nodes => Some(self.source(v)),
            Variable::Target(v) if v < self.num_nodes => Some(self.target(v)),
            Variable::Edge(x, y) => self
                .edges
                .iter()
                .position(|&e| e == (x, y))
                .map(|i| self.edge(i)),
            _ => None,
        }
    }

    pub fn variable_at(&self, index: usize) -> Option<Variable> {
        let n = self.num_nodes;
        if index < n {
            Some(Variable::Source(index))
        } else if index < 2 * n {
            Some(Variable::Target(index - n))
        } else {
            self.edges
                .get(index - 2 * n)
                .map(|&(x, y)| Variable::Edge(x, y))
        }
    }

    /// All variables in index order.
    pub fn labels(&self) -> Vec<Variable> {
        (0..self.num_x()).filter_map(|i| self.variable_at(i)).collect()
    }
}

/// Flat index of "vertex belongs to community".
pub const fn community_index(vertex: usize, community: usize, communities: usize) -> usize {
    vertex * communities + community
}

/// Inverse of [`community_index`], returns (vertex, community).
pub const fn community_from_index(index: usize, communities: usize) -> (usize, usize) {
    (index / communities, index % communities)
}

pub fn community_labels(vertices: usize, communities: usize) -> Vec<Variable> {
    (0..vertices * communities)
        .map(|i| {
            let (vertex, community) = community_from_index(i, communities);
            Variable::Community { vertex, community }
        })
        .collect()
}

/// Flat index of "source maps to target" on n vertices.
pub const fn mapping_index(source: usize, target: usize, vertices: usize) -> usize {
    source * vertices + target
}

/// Inverse of [`mapping_index`], returns (source, target).
pub const fn mapping_from_index(index: usize, vertices: usize) -> (usize, usize) {
    (index / vertices, index % vertices)
}

pub fn mapping_labels(vertices: usize) -> Vec<Variable> {
    (0..vertices * vertices)
        .map(|i| {
            let (source, target) = mapping_from_index(i, vertices);
            Variable::Mapping { source, target }
        })
        .collect()
}
