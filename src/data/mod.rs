//! Data layer: configuration, retrieval, parsing, and the loaded aggregate.
//!
//! Architecture:
//! ```text
//!  LoadOptions ──► path / url
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  source   │  fetch <base>.data.gz / .labelsN.gz / .txt  (Found | Missing)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   text    │  whitespace-delimited numbers → matrix / vector
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  validate shapes, preprocess → ClusteringBenchmark
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  rows of the selected clusters
//!   └──────────┘
//! ```

pub mod expand;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
pub mod preprocess;
pub mod source;
pub mod text;
