use std::io;
use std::path::{Path, PathBuf};

use super::expand::{expand_user, expand_vars};
use super::model::{ClusteringBenchmark, DataMatrix, LabelVector};
use super::options::{LoadOptions, SourceLocation};
use super::preprocess::{Preprocess, StandardPreprocessor};
use super::source::{Fetched, LocalSource, RemoteSource, Retrieve};
use super::text::{parse_matrix, parse_vector, read_text};
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load `battery/dataset` with the default [`StandardPreprocessor`].
///
/// Reads `<dataset>.data.gz`, then `<dataset>.labels0.gz`,
/// `<dataset>.labels1.gz`, ... until the first missing index, then
/// `<dataset>.txt`, all relative to `<path or url>/<battery>/`.
pub fn load_dataset(battery: &str, dataset: &str, options: &LoadOptions) -> Result<ClusteringBenchmark> {
    load_dataset_with(battery, dataset, options, &StandardPreprocessor::default())
}

/// Like [`load_dataset`], with a caller-supplied preprocessing step.
pub fn load_dataset_with(
    battery: &str,
    dataset: &str,
    options: &LoadOptions,
    preprocessor: &dyn Preprocess,
) -> Result<ClusteringBenchmark> {
    check_identifier("battery", battery)?;
    check_identifier("dataset", dataset)?;

    let (source, stem) = open_source(battery, dataset, options)?;
    let preprocess = options.preprocess.then_some(preprocessor);
    load_from(source.as_ref(), battery, dataset, &stem, preprocess, options.random_seed)
}

/// Load from an already opened source, where `stem` is the file name prefix
/// of the dataset's resources (`<stem>.data.gz`, ...).
pub fn load_from(
    source: &dyn Retrieve,
    battery: &str,
    dataset: &str,
    stem: &str,
    preprocess: Option<&dyn Preprocess>,
    random_seed: Option<u64>,
) -> Result<ClusteringBenchmark> {
    let mut data = read_data(source, stem)?;

    if let Some(p) = preprocess {
        data = p.preprocess(data, random_seed);
    }

    let labels = read_labels(source, stem, data.nrows())?;
    let description = read_description(source, stem)?;

    log::info!(
        "Loaded {battery}/{dataset}: {} rows, {} columns, {} label vector(s)",
        data.nrows(),
        data.ncols(),
        labels.len()
    );

    Ok(ClusteringBenchmark::new(
        battery.to_string(),
        dataset.to_string(),
        description,
        data,
        labels,
    ))
}

// ---------------------------------------------------------------------------
// Source resolution
// ---------------------------------------------------------------------------

fn check_identifier(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LoadError::InvalidConfiguration {
            message: format!("{what} name must not be empty"),
        });
    }
    Ok(())
}

/// Local base name `path/battery/dataset` with the requested expansions applied.
///
/// A path that is not valid UTF-8 is returned as joined, without expansion.
pub fn local_base_name(path: &Path, battery: &str, dataset: &str, options: &LoadOptions) -> PathBuf {
    let joined = path.join(battery).join(dataset);
    let Some(text) = joined.to_str() else {
        log::debug!("Not expanding non-UTF-8 path {}", joined.display());
        return joined;
    };
    let mut base = text.to_string();
    if options.expand_user {
        base = expand_user(&base);
    }
    if options.expand_vars {
        base = expand_vars(&base);
    }
    PathBuf::from(base)
}

/// Remote base name `url/battery/dataset`; URLs are never expanded.
pub fn remote_base_name(url: &str, battery: &str, dataset: &str) -> String {
    format!("{url}/{battery}/{dataset}")
}

fn open_source(battery: &str, dataset: &str, options: &LoadOptions) -> Result<(Box<dyn Retrieve>, String)> {
    match &options.source {
        SourceLocation::Url(url) => {
            let source = RemoteSource::new(format!("{url}/{battery}"))?;
            log::debug!("Reading {} from {}", dataset, remote_base_name(url, battery, dataset));
            Ok((Box::new(source), dataset.to_string()))
        }
        SourceLocation::Path(path) => {
            let base = local_base_name(path, battery, dataset, options);
            let dir = base
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let stem = base
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| dataset.to_string());
            log::debug!("Reading {} from {}", stem, dir.display());
            Ok((Box::new(LocalSource::new(dir)), stem))
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

fn required(source: &dyn Retrieve, name: &str, gzipped: bool) -> Result<Box<dyn io::Read>> {
    let fetched = source.fetch(name)?;
    let fetched = if gzipped { fetched.gunzip() } else { fetched };
    match fetched {
        Fetched::Found(r) => Ok(r),
        Fetched::Missing => Err(LoadError::io(
            source.locate(name),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        )),
    }
}

fn read_data(source: &dyn Retrieve, stem: &str) -> Result<DataMatrix> {
    let name = format!("{stem}.data.gz");
    let resource = source.locate(&name);
    let text = read_text(required(source, &name, true)?, &resource)?;
    parse_matrix(&text, &resource)
}

fn read_labels(source: &dyn Retrieve, stem: &str, n_rows: usize) -> Result<Vec<LabelVector>> {
    let mut labels = Vec::new();
    for i in 0.. {
        let name = format!("{stem}.labels{i}.gz");
        let resource = source.locate(&name);

        let reader = match source.fetch(&name)?.gunzip() {
            Fetched::Found(r) => r,
            Fetched::Missing => {
                log::debug!("No {resource}; found {i} label vector(s)");
                break;
            }
        };

        let l = parse_vector(&read_text(reader, &resource)?, &resource)?;
        if l.len() != n_rows {
            return Err(LoadError::invalid_data(
                resource,
                format!("Incorrect number of labels: {} given for {n_rows} rows", l.len()),
            ));
        }
        labels.push(l);
    }
    Ok(labels)
}

fn read_description(source: &dyn Retrieve, stem: &str) -> Result<String> {
    let name = format!("{stem}.txt");
    let resource = source.locate(&name);
    read_text(required(source, &name, false)?, &resource)
}
