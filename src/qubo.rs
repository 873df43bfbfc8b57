use crate::variables::Variable;
use ndarray::{Array1, Array2};
use sprs::{CsMat, TriMat};

/// A QUBO in upper triangular form, where the energy of a binary point x is x^T Q x.
///
/// The diagonal carries the linear terms. Every variable has a label, in index order.
#[derive(Debug, Clone)]
pub struct Qubo {
    pub q: CsMat<f64>,
    pub labels: Vec<Variable>,
}

impl Qubo {
    pub fn num_x(&self) -> usize {
        self.q.cols()
    }

    /// The energy x^T Q x of a binary point.
    pub fn eval_usize(&self, x: &Array1<usize>) -> f64 {
        let x_float = x.mapv(|x_i| x_i as f64);
        let temp = &self.q * &x_float;
        x_float.dot(&temp)
    }

    /// Coefficient of x_i x_j, in either order.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        self.q.get(row, col).copied().unwrap_or(0.0)
    }

    /// The linear term of x_i.
    pub fn linear(&self, i: usize) -> f64 {
        self.coefficient(i, i)
    }

    pub fn to_dense(&self) -> Array2<f64> {
        self.q.to_dense()
    }

    /// True when nothing is stored below the diagonal.
    pub fn is_upper_triangular(&self) -> bool {
        self.q.iter().all(|(_, (i, j))| i <= j)
    }

    /// Index of a labelled variable.
    pub fn index_of(&self, var: &Variable) -> Option<usize> {
        self.labels.iter().position(|l| l == var)
    }

    /// Returns the QUBO in (rows, cols, values, num_x) form, dropping entries that cancelled to zero.
    pub fn to_vec(&self) -> (Vec<usize>, Vec<usize>, Vec<f64>, usize) {
        let mut i_indexs = Vec::new();
        let mut j_indexs = Vec::new();
        let mut q_values = Vec::new();

        for (&value, (i, j)) in &self.q {
            if value != 0.0 {
                i_indexs.push(i);
                j_indexs.push(j);
                q_values.push(value);
            }
        }

        (i_indexs, j_indexs, q_values, self.num_x())
    }
}

/// Accumulates QUBO coefficients. Adding to the same entry twice sums the values, and any
/// entry below the diagonal is folded onto its mirror above it.
pub struct QuboBuilder {
    q: TriMat<f64>,
    labels: Vec<Variable>,
}

impl QuboBuilder {
    pub fn new(labels: Vec<Variable>) -> Self {
        let num_x = labels.len();
        Self {
            q: TriMat::new((num_x, num_x)),
            labels,
        }
    }

    pub fn num_x(&self) -> usize {
        self.labels.len()
    }

    /// Adds `value` to the coefficient of x_i x_j.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        if value == 0.0 {
            return;
        }
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        self.q.add_triplet(row, col, value);
    }

    /// Adds `value` to the linear term of x_i.
    pub fn add_linear(&mut self, i: usize, value: f64) {
        self.add(i, i, value);
    }

    pub fn build(self) -> Qubo {
        Qubo {
            q: self.q.to_csr(),
            labels: self.labels,
        }
    }
}
