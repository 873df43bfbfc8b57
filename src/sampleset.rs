//! Solver output as the decoders see it.
//!
//! A sample set is the list of binary assignments an annealer returned, each with its energy and
//! how often it was read. It is kept sorted by energy, lowest first, since the decoders keep the
//! first answer they find for each question.

use crate::error::QuboError;
use crate::qubo::Qubo;
use crate::variables::Variable;
use ndarray::Array1;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: Array1<usize>,
    pub energy: f64,
    pub num_occurrences: usize,
}

impl Sample {
    pub fn new(x: Array1<usize>, energy: f64) -> Self {
        Self {
            x,
            energy,
            num_occurrences: 1,
        }
    }

    pub fn is_set(&self, i: usize) -> bool {
        self.x.get(i).is_some_and(|&x_i| x_i == 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    labels: Vec<Variable>,
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Builds a sample set from assignments, with energies evaluated against the QUBO.
    ///
    /// # Errors
    ///
    /// Returns `QuboError::SampleSizeMismatch` if an assignment does not cover the QUBO.
    pub fn from_samples(qubo: &Qubo, xs: Vec<Array1<usize>>) -> Result<Self, QuboError> {
        check_sizes(qubo.num_x(), xs.iter())?;

        let samples = xs
            .into_par_iter()
            .map(|x| {
                let energy = qubo.eval_usize(&x);
                Sample::new(x, energy)
            })
            .collect();

        Ok(Self::from_parts(qubo.labels.clone(), samples))
    }

    /// Builds a sample set from assignments whose energies came from the solver.
    ///
    /// # Errors
    ///
    /// Returns `QuboError::SampleSizeMismatch` if an assignment does not match the labels.
    pub fn from_weighted(
        labels: Vec<Variable>,
        samples: Vec<(Array1<usize>, f64)>,
    ) -> Result<Self, QuboError> {
        check_sizes(labels.len(), samples.iter().map(|(x, _)| x))?;

        let samples = samples
            .into_iter()
            .map(|(x, energy)| Sample::new(x, energy))
            .collect();

        Ok(Self::from_parts(labels, samples))
    }

    fn from_parts(labels: Vec<Variable>, mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { labels, samples }
    }

    /// Merges identical assignments, summing their occurrence counts. The merged sample takes
    /// the place of the first copy.
    pub fn aggregate(&self) -> Self {
        let mut merged: Vec<Sample> = Vec::with_capacity(self.samples.len());

        for sample in &self.samples {
            match merged.iter_mut().find(|m| m.x == sample.x) {
                Some(m) => m.num_occurrences += sample.num_occurrences,
                None => merged.push(sample.clone()),
            }
        }

        Self {
            labels: self.labels.clone(),
            samples: merged,
        }
    }

    /// Keeps the samples matching `predicate`, in order.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Sample) -> bool,
    {
        Self {
            labels: self.labels.clone(),
            samples: self
                .samples
                .iter()
                .filter(|s| predicate(s))
                .cloned()
                .collect(),
        }
    }

    /// The lowest energy sample.
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> &[Variable] {
        &self.labels
    }

    /// The value of a labelled variable in a sample, `None` for an unknown label.
    pub fn value(&self, sample: &Sample, var: &Variable) -> Option<usize> {
        self.labels
            .iter()
            .position(|l| l == var)
            .and_then(|i| sample.x.get(i).copied())
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_sizes<'a>(
    expected: usize,
    mut xs: impl Iterator<Item = &'a Array1<usize>>,
) -> Result<(), QuboError> {
    match xs.find(|x| x.len() != expected) {
        Some(x) => Err(QuboError::SampleSizeMismatch {
            expected,
            got: x.len(),
        }),
        None => Ok(()),
    }
}

/// Every assignment of a small QUBO, lowest energy first. Stands in for the annealer in tests.
#[cfg(test)]
pub(crate) fn enumerate_samples(qubo: &Qubo) -> SampleSet {
    let num_vars = qubo.num_x();
    let xs = (0..1usize << num_vars)
        .map(|i| Array1::from_iter((0..num_vars).map(|j| (i >> j) & 1)))
        .collect();

    SampleSet::from_samples(qubo, xs).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubo::QuboBuilder;

    fn small_qubo() -> Qubo {
        let mut b = QuboBuilder::new((0..3).map(Variable::Source).collect());
        b.add_linear(0, -1.0);
        b.add_linear(1, -2.0);
        b.add(0, 1, 5.0);
        b.add_linear(2, 1.0);
        b.build()
    }

    #[test]
    fn test_sorted_by_energy() {
        let p = small_qubo();
        let xs = vec![
            Array1::from_vec(vec![1, 1, 0]),
            Array1::from_vec(vec![0, 1, 0]),
            Array1::from_vec(vec![1, 0, 0]),
            Array1::from_vec(vec![0, 0, 0]),
        ];
        let set = SampleSet::from_samples(&p, xs).unwrap();
        let energies: Vec<f64> = set.iter().map(|s| s.energy).collect();

        assert_eq!(energies, vec![-2.0, -1.0, 0.0, 2.0]);
        assert_eq!(set.first().unwrap().x, Array1::from_vec(vec![0, 1, 0]));
    }

    #[test]
    fn test_aggregate_and_filter() {
        let p = small_qubo();
        let xs = vec![
            Array1::from_vec(vec![0, 1, 0]),
            Array1::from_vec(vec![0, 0, 1]),
            Array1::from_vec(vec![0, 1, 0]),
            Array1::from_vec(vec![0, 1, 0]),
        ];
        let set = SampleSet::from_samples(&p, xs).unwrap().aggregate();

        assert_eq!(set.len(), 2);
        assert_eq!(set.first().unwrap().num_occurrences, 3);

        let negative = set.filter(|s| s.energy < 0.0);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative.value(negative.first().unwrap(), &Variable::Source(1)), Some(1));
        assert_eq!(negative.value(negative.first().unwrap(), &Variable::Target(1)), None);
    }

    #[test]
    fn test_size_mismatch() {
        let p = small_qubo();
        let err = SampleSet::from_samples(&p, vec![Array1::from_vec(vec![0, 1])]).unwrap_err();

        assert_eq!(err, QuboError::SampleSizeMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn test_enumerate_finds_ground_state() {
        let set = enumerate_samples(&small_qubo());

        assert_eq!(set.len(), 8);
        assert_eq!(set.first().unwrap().energy, -2.0);
    }
}
