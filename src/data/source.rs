use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Retrieval outcome
// ---------------------------------------------------------------------------

/// Outcome of asking a source for one resource.
///
/// Absence is a normal answer, distinct from every other failure, which
/// comes back as an `Err`.
pub enum Fetched {
    Found(Box<dyn Read>),
    Missing,
}

impl Fetched {
    /// Wrap the stream in a gzip decoder.
    pub fn gunzip(self) -> Fetched {
        match self {
            Fetched::Found(r) => Fetched::Found(Box::new(GzDecoder::new(r))),
            Fetched::Missing => Fetched::Missing,
        }
    }
}

/// Something benchmark files can be read from.
pub trait Retrieve {
    /// Human-readable location of `name`, used in logs and errors.
    fn locate(&self, name: &str) -> String;

    /// Open `name` (a file name relative to the dataset's base, e.g.
    /// `x2.data.gz`) for reading.
    fn fetch(&self, name: &str) -> Result<Fetched>;
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

/// Files under a battery directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Retrieve for LocalSource {
    fn locate(&self, name: &str) -> String {
        self.dir.join(name).display().to_string()
    }

    fn fetch(&self, name: &str) -> Result<Fetched> {
        let path = self.dir.join(name);
        log::debug!("Opening {}", path.display());
        match File::open(&path) {
            Ok(f) => Ok(Fetched::Found(Box::new(BufReader::new(f)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Fetched::Missing),
            Err(e) => Err(LoadError::io(path.display().to_string(), e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Remote base URL
// ---------------------------------------------------------------------------

/// Files under `<base_url>/<battery>/` fetched with plain HTTP(S) GET.
pub struct RemoteSource {
    base: String,
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    /// `base` is the battery URL, e.g. `https://host/clustering-data-v1/raw/v1.1.0/wut`.
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let base = base.into();
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("clustbench/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::Http {
                resource: base.clone(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { base, client })
    }
}

impl Retrieve for RemoteSource {
    fn locate(&self, name: &str) -> String {
        format!("{}/{}", self.base, name)
    }

    fn fetch(&self, name: &str) -> Result<Fetched> {
        let url = self.locate(name);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().map_err(|e| LoadError::Http {
            resource: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Fetched::Missing);
        }
        if !status.is_success() {
            return Err(LoadError::Http {
                resource: url,
                message: format!("server returned {status}"),
            });
        }
        Ok(Fetched::Found(Box::new(response)))
    }
}
