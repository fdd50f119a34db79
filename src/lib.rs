//! Loading of labelled clustering benchmark datasets.
//!
//! A benchmark lives in a *battery* directory as three kinds of files:
//!
//! ```text
//! <battery>/<dataset>.data.gz      gzip'd whitespace-delimited float matrix
//! <battery>/<dataset>.labels0.gz   gzip'd integer label vectors, one per
//! <battery>/<dataset>.labels1.gz   candidate partition, numbered from 0
//! <battery>/<dataset>.txt          plain-text description
//! ```
//!
//! The files are read either from a local directory or from a remote base URL.
//!
//! ```no_run
//! use clustbench::{load_dataset, LoadOptions};
//!
//! let opts = LoadOptions::new(Some("~/Projects/clustering-data-v1"), None::<&str>)?
//!     .with_preprocess(false);
//! let wut_x2 = load_dataset("wut", "x2", &opts)?;
//! println!("{} rows, {} partitions", wut_x2.n_rows(), wut_x2.labels().len());
//! # Ok::<(), clustbench::LoadError>(())
//! ```

pub mod data;
pub mod error;

pub use data::loader::{load_dataset, load_dataset_with};
pub use data::model::{ClusteringBenchmark, DataMatrix, LabelVector};
pub use data::options::{LoadOptions, SourceLocation};
pub use data::preprocess::{Preprocess, StandardPreprocessor};
pub use error::{LoadError, Result};
