use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use clustbench::data::filter::{filtered_indices, init_selection, ClusterSelection};
use clustbench::{load_dataset, ClusteringBenchmark, LoadOptions, SourceLocation};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Load form
// ---------------------------------------------------------------------------

/// Contents of the load form in the top bar.
pub struct LoadForm {
    /// Read from `location` as a URL instead of a directory.
    pub use_url: bool,
    pub location: String,
    pub battery: String,
    pub dataset: String,
    pub preprocess: bool,
    /// Seed as typed; empty means none.
    pub seed: String,
}

impl Default for LoadForm {
    fn default() -> Self {
        Self {
            use_url: false,
            location: ".".to_string(),
            battery: "wut".to_string(),
            dataset: "x2".to_string(),
            preprocess: true,
            seed: String::new(),
        }
    }
}

impl LoadForm {
    /// Translate the form into loader options.
    pub fn options(&self) -> Result<LoadOptions> {
        let location = self.location.trim();
        let opts = if self.use_url {
            LoadOptions::from_url(location.trim_end_matches('/'))
        } else {
            LoadOptions::from_path(location)
        };

        let seed = match self.seed.trim() {
            "" => None,
            s => Some(
                s.parse::<u64>()
                    .with_context(|| format!("Seed '{s}' is not a non-negative integer"))?,
            ),
        };

        Ok(opts.with_preprocess(self.preprocess).with_random_seed(seed))
    }

    /// Fill the form from loader options.
    pub fn from_options(battery: &str, dataset: &str, opts: &LoadOptions) -> Self {
        let (use_url, location) = match &opts.source {
            SourceLocation::Path(p) => (false, p.display().to_string()),
            SourceLocation::Url(u) => (true, u.clone()),
        };
        Self {
            use_url,
            location,
            battery: battery.to_string(),
            dataset: dataset.to_string(),
            preprocess: opts.preprocess,
            seed: opts.random_seed.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    /// Write the form to `path` as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let saved = SavedLoad {
            battery: self.battery.trim().to_string(),
            dataset: self.dataset.trim().to_string(),
            options: self.options()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&saved).context("serialising load form")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Read a form previously written by [`LoadForm::save`].
    pub fn restore(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let saved: SavedLoad = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_options(&saved.battery, &saved.dataset, &saved.options))
    }
}

/// On-disk record of the last successful load.
#[derive(Serialize, Deserialize)]
struct SavedLoad {
    battery: String,
    dataset: String,
    options: LoadOptions,
}

/// Where the viewer keeps the last successful load form.
pub fn default_form_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("clustbench").join("load_form.json"))
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub form: LoadForm,

    /// Loaded benchmark (None until the user loads one).
    pub benchmark: Option<ClusteringBenchmark>,

    /// Label vector used for colouring and filtering.
    pub label_index: Option<usize>,

    /// Clusters of the active label vector that are shown.
    pub selection: ClusterSelection,

    /// Indices of rows passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Data columns on the plot axes.
    pub x_col: usize,
    pub y_col: usize,

    /// Active colour map.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// File the form is saved to after each successful load.
    pub form_file: Option<PathBuf>,
}

impl AppState {
    /// State whose form is restored from, and saved to, `form_file`.
    pub fn with_form_file(form_file: Option<PathBuf>) -> Self {
        let mut state = Self::default();
        if let Some(path) = form_file.as_deref().filter(|p| p.exists()) {
            match LoadForm::restore(path) {
                Ok(form) => state.form = form,
                Err(e) => log::warn!("Ignoring saved load form: {e:#}"),
            }
        }
        state.form_file = form_file;
        state
    }

    /// Load the benchmark described by the form.
    pub fn load_from_form(&mut self) -> Result<()> {
        let opts = self.form.options()?;
        let battery = self.form.battery.trim().to_string();
        let dataset = self.form.dataset.trim().to_string();
        let benchmark = load_dataset(&battery, &dataset, &opts)
            .with_context(|| format!("loading {battery}/{dataset}"))?;
        self.set_benchmark(benchmark);

        if let Some(path) = &self.form_file {
            if let Err(e) = self.form.save(path) {
                log::warn!("Failed to save load form: {e:#}");
            }
        }
        Ok(())
    }

    /// Ingest a newly loaded benchmark, initialise filters and colour.
    pub fn set_benchmark(&mut self, benchmark: ClusteringBenchmark) {
        self.x_col = 0;
        self.y_col = if benchmark.n_cols() > 1 { 1 } else { 0 };

        // Default colouring: the first label vector (if any).
        let label_index = if benchmark.labels().is_empty() { None } else { Some(0) };
        self.benchmark = Some(benchmark);
        self.set_label_index(label_index);
        self.status_message = None;
    }

    /// Switch the label vector used for colouring; selects all its clusters.
    pub fn set_label_index(&mut self, index: Option<usize>) {
        self.label_index = index;
        let Some(b) = &self.benchmark else {
            return;
        };
        match index {
            Some(k) => {
                self.selection = init_selection(b, k);
                self.color_map = Some(ColorMap::new(&self.selection));
            }
            None => {
                self.selection.clear();
                self.color_map = None;
            }
        }
        self.refilter();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(b) = &self.benchmark {
            self.visible_indices = filtered_indices(b, self.label_index, &self.selection);
        }
    }

    /// Toggle a single cluster.
    pub fn toggle_cluster(&mut self, cluster: i64) {
        if !self.selection.remove(&cluster) {
            self.selection.insert(cluster);
        }
        self.refilter();
    }

    /// Show every cluster of the active label vector.
    pub fn select_all(&mut self) {
        if let (Some(b), Some(k)) = (&self.benchmark, self.label_index) {
            self.selection = init_selection(b, k);
            self.refilter();
        }
    }

    /// Hide every cluster.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_gz(path: std::path::PathBuf, text: &str) {
        let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(text.as_bytes()).unwrap();
        std::fs::write(path, enc.finish().unwrap()).unwrap();
    }

    fn loaded_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let wut = dir.path().join("wut");
        std::fs::create_dir(&wut).unwrap();
        write_gz(wut.join("x2.data.gz"), "0 0\n1 1\n5 5\n");
        write_gz(wut.join("x2.labels0.gz"), "1\n1\n2\n");
        std::fs::write(wut.join("x2.txt"), "demo").unwrap();

        let mut state = AppState::default();
        state.form.location = dir.path().display().to_string();
        state.form.preprocess = false;
        state.load_from_form().unwrap();
        (dir, state)
    }

    #[test]
    fn test_form_seed_parsing() {
        let mut form = LoadForm::default();
        form.seed = "12".into();
        assert_eq!(form.options().unwrap().random_seed, Some(12));
        form.seed = "-1".into();
        assert!(form.options().is_err());
    }

    #[test]
    fn test_load_sets_colouring_and_filter() {
        let (_dir, state) = loaded_state();
        assert_eq!(state.label_index, Some(0));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!((state.x_col, state.y_col), (0, 1));
        assert!(state.color_map.is_some());
    }

    #[test]
    fn test_toggle_and_select() {
        let (_dir, mut state) = loaded_state();
        state.toggle_cluster(1);
        assert_eq!(state.visible_indices, vec![2]);
        state.select_none();
        assert!(state.visible_indices.is_empty());
        state.select_all();
        assert_eq!(state.visible_indices.len(), 3);
        state.set_label_index(None);
        assert_eq!(state.visible_indices.len(), 3);
        assert!(state.color_map.is_none());
    }

    #[test]
    fn test_form_save_and_restore() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("load_form.json");

        let mut form = LoadForm::default();
        form.use_url = true;
        form.location = "https://example.org/suite".into();
        form.dataset = "smile".into();
        form.preprocess = false;
        form.seed = "42".into();
        form.save(&path).unwrap();

        let restored = LoadForm::restore(&path).unwrap();
        assert!(restored.use_url);
        assert_eq!(restored.location, "https://example.org/suite");
        assert_eq!(restored.battery, "wut");
        assert_eq!(restored.dataset, "smile");
        assert!(!restored.preprocess);
        assert_eq!(restored.seed, "42");

        let opts = restored.options().unwrap();
        assert_eq!(opts.source, SourceLocation::Url("https://example.org/suite".into()));
        assert_eq!(opts.random_seed, Some(42));
    }

    #[test]
    fn test_successful_load_saves_form() {
        let (dir, mut state) = loaded_state();
        let path = dir.path().join("load_form.json");
        state.form_file = Some(path.clone());
        state.load_from_form().unwrap();

        let restored = AppState::with_form_file(Some(path));
        assert_eq!(restored.form.location, state.form.location);
        assert_eq!(restored.form.dataset, "x2");
        assert!(!restored.form.preprocess);
        assert!(restored.benchmark.is_none());
    }

    #[test]
    fn test_unreadable_form_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("load_form.json");
        std::fs::write(&path, "not json").unwrap();
        let state = AppState::with_form_file(Some(path));
        assert_eq!(state.form.battery, "wut");
        assert_eq!(state.form.location, ".");
    }

    #[test]
    fn test_load_failure_keeps_previous_benchmark() {
        let (_dir, mut state) = loaded_state();
        state.form.dataset = "missing".into();
        assert!(state.load_from_form().is_err());
        assert_eq!(state.benchmark.as_ref().unwrap().dataset(), "x2");
    }
}
