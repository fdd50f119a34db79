use std::io::Write;

use serde::Serialize;

use super::model::ClusteringBenchmark;
use crate::error::{LoadError, Result};

/// JSON layout of an exported benchmark, matrix stored row by row.
#[derive(Serialize)]
struct BenchmarkRecord<'a> {
    battery: &'a str,
    dataset: &'a str,
    description: &'a str,
    data: Vec<Vec<f64>>,
    labels: Vec<Vec<i64>>,
}

impl<'a> From<&'a ClusteringBenchmark> for BenchmarkRecord<'a> {
    fn from(b: &'a ClusteringBenchmark) -> Self {
        BenchmarkRecord {
            battery: b.battery(),
            dataset: b.dataset(),
            description: b.description(),
            data: b.data().rows().into_iter().map(|r| r.to_vec()).collect(),
            labels: b.labels().iter().map(|l| l.to_vec()).collect(),
        }
    }
}

/// Write the benchmark as one pretty-printed JSON object.
pub fn write_json<W: Write>(benchmark: &ClusteringBenchmark, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &BenchmarkRecord::from(benchmark)).map_err(|e| {
        LoadError::Export {
            message: format!("writing JSON for {}: {e}", benchmark.name()),
        }
    })
}

/// Write one CSV row per point: the features `x0..`, then `labels0..`.
pub fn write_csv<W: Write>(benchmark: &ClusteringBenchmark, writer: W) -> Result<()> {
    let csv_err = |e: csv::Error| LoadError::Export {
        message: format!("writing CSV for {}: {e}", benchmark.name()),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    let header = (0..benchmark.n_cols())
        .map(|j| format!("x{j}"))
        .chain((0..benchmark.labels().len()).map(|k| format!("labels{k}")));
    wtr.write_record(header).map_err(csv_err)?;

    for (i, row) in benchmark.data().rows().into_iter().enumerate() {
        let record = row
            .iter()
            .map(|v| v.to_string())
            .chain(benchmark.labels().iter().map(|l| l[i].to_string()));
        wtr.write_record(record).map_err(csv_err)?;
    }

    wtr.flush().map_err(|e| LoadError::Export {
        message: format!("flushing CSV for {}: {e}", benchmark.name()),
    })
}
