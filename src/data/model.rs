use std::collections::BTreeSet;

use ndarray::{Array1, Array2};

/// Numeric data matrix, one row per point.
pub type DataMatrix = Array2<f64>;

/// One candidate partition of the rows, `labels[i]` is the cluster of row `i`.
pub type LabelVector = Array1<i64>;

// ---------------------------------------------------------------------------
// ClusteringBenchmark – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A loaded benchmark: the data matrix, every label vector found for it,
/// and the accompanying description.
///
/// Built once by the loader and never modified afterwards; every label
/// vector has exactly `n_rows()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringBenchmark {
    battery: String,
    dataset: String,
    description: String,
    data: DataMatrix,
    labels: Vec<LabelVector>,
}

impl ClusteringBenchmark {
    pub(crate) fn new(
        battery: String,
        dataset: String,
        description: String,
        data: DataMatrix,
        labels: Vec<LabelVector>,
    ) -> Self {
        debug_assert!(labels.iter().all(|l| l.len() == data.nrows()));
        ClusteringBenchmark {
            battery,
            dataset,
            description,
            data,
            labels,
        }
    }

    /// Battery name, e.g. `"wut"`.
    pub fn battery(&self) -> &str {
        &self.battery
    }

    /// Dataset name within the battery, e.g. `"x2"`.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Contents of the `.txt` description file.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data(&self) -> &DataMatrix {
        &self.data
    }

    /// Label vectors in discovery order (`labels0`, `labels1`, ...).
    pub fn labels(&self) -> &[LabelVector] {
        &self.labels
    }

    /// Number of points.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features.
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Sorted distinct cluster identifiers of label vector `index`.
    pub fn label_values(&self, index: usize) -> Option<BTreeSet<i64>> {
        self.labels
            .get(index)
            .map(|l| l.iter().copied().collect())
    }

    /// `"battery/dataset"`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.battery, self.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> ClusteringBenchmark {
        ClusteringBenchmark::new(
            "wut".into(),
            "x2".into(),
            "demo".into(),
            array![[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]],
            vec![array![1, 1, 2], array![3, 1, 3]],
        )
    }

    #[test]
    fn test_dimensions_and_name() {
        let b = sample();
        assert_eq!(b.n_rows(), 3);
        assert_eq!(b.n_cols(), 2);
        assert_eq!(b.name(), "wut/x2");
    }

    #[test]
    fn test_label_values_sorted_unique() {
        let b = sample();
        let vals: Vec<i64> = b.label_values(1).unwrap().into_iter().collect();
        assert_eq!(vals, vec![1, 3]);
        assert!(b.label_values(2).is_none());
    }
}
