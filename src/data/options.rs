use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Where a battery collection lives: a local directory or a remote base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::Path(PathBuf::from("."))
    }
}

/// Settings of one load call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub source: SourceLocation,
    /// Expand a leading `~` in local paths.
    pub expand_user: bool,
    /// Expand `$VAR` and `${VAR}` in local paths.
    pub expand_vars: bool,
    /// Pass the data matrix through the preprocessing collaborator.
    pub preprocess: bool,
    /// Forwarded untouched to the preprocessing collaborator.
    pub random_seed: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            source: SourceLocation::default(),
            expand_user: true,
            expand_vars: true,
            preprocess: true,
            random_seed: None,
        }
    }
}

impl LoadOptions {
    /// Build options from the mutually exclusive `path` / `url` pair.
    ///
    /// Neither given selects the current directory; both given is an error.
    pub fn new<P, U>(path: Option<P>, url: Option<U>) -> Result<Self>
    where
        P: Into<PathBuf>,
        U: Into<String>,
    {
        let source = match (path, url) {
            (Some(_), Some(_)) => {
                return Err(LoadError::InvalidConfiguration {
                    message: "`url` and `path` are mutually exclusive".to_string(),
                })
            }
            (Some(p), None) => SourceLocation::Path(p.into()),
            (None, Some(u)) => SourceLocation::Url(u.into()),
            (None, None) => SourceLocation::default(),
        };
        Ok(Self {
            source,
            ..Self::default()
        })
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceLocation::Path(path.into()),
            ..Self::default()
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            source: SourceLocation::Url(url.into()),
            ..Self::default()
        }
    }

    pub fn with_expand_user(mut self, expand_user: bool) -> Self {
        self.expand_user = expand_user;
        self
    }

    pub fn with_expand_vars(mut self, expand_vars: bool) -> Self {
        self.expand_vars = expand_vars;
        self
    }

    pub fn with_preprocess(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }
}
