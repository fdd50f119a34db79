use std::collections::BTreeSet;

use super::model::ClusteringBenchmark;

// ---------------------------------------------------------------------------
// Filter predicate: which clusters of the active label vector are shown
// ---------------------------------------------------------------------------

/// Selected cluster identifiers of the active label vector.
pub type ClusterSelection = BTreeSet<i64>;

/// Initialise a [`ClusterSelection`] with every cluster of label vector `index` selected.
pub fn init_selection(benchmark: &ClusteringBenchmark, index: usize) -> ClusterSelection {
    benchmark.label_values(index).unwrap_or_default()
}

/// Return indices of rows that pass the cluster filter.
///
/// * No active label vector (`None`, or an index past the last vector) → every row passes
/// * Otherwise a row passes when its label is in `selected`
pub fn filtered_indices(
    benchmark: &ClusteringBenchmark,
    label_index: Option<usize>,
    selected: &ClusterSelection,
) -> Vec<usize> {
    let Some(labels) = label_index.and_then(|k| benchmark.labels().get(k)) else {
        return (0..benchmark.n_rows()).collect();
    };
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| selected.contains(l))
        .map(|(i, _)| i)
        .collect()
}
