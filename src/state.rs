use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::cache::{DatasetCache, SourceIdentity};
use crate::data::filter::{Dimension, DimensionValue, FilterSelection};
use crate::data::model::Dataset;
use crate::error::{DataSourceError, ExportError};
use crate::present::{write_csv, Dashboard};

/// One line of feedback for the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Where the dataset comes from.
    pub source: SourceIdentity,

    cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Per-dimension filter selections.
    pub filters: FilterSelection,

    /// Set when the last load failed; the dashboard is not drawn.
    pub load_error: Option<String>,

    /// Status message shown in the top bar.
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let source = SourceIdentity::new(config.source_path.clone(), config.sheet.clone());
        Self {
            config,
            source,
            cache: DatasetCache::new(),
            dataset: None,
            filters: FilterSelection::none(),
            load_error: None,
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the current source.
    pub fn load(&mut self) -> Result<(), DataSourceError> {
        match self.cache.get_or_load(&self.source) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.source.path.display());
                self.dataset = None;
                self.filters = FilterSelection::none();
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Switch to another file, keeping the configured sheet name.
    pub fn open(&mut self, path: PathBuf) -> Result<(), DataSourceError> {
        self.source = SourceIdentity::new(path, self.config.sheet.clone());
        self.load()
    }

    /// Forget the cached dataset and read the source again.
    pub fn reload(&mut self) -> Result<(), DataSourceError> {
        self.cache.invalidate();
        self.load()
    }

    /// Ingest a loaded dataset and reset filters to "everything".
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.filters = FilterSelection::all(&dataset);
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
    }

    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &DimensionValue) {
        self.filters.toggle(dim, value);
        log::debug!("Toggled {value} in {dim:?}");
    }

    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            self.filters.select_all(dim, ds);
        }
    }

    pub fn select_none(&mut self, dim: Dimension) {
        self.filters.select_none(dim);
    }

    /// Derived artifacts for the current selection.
    pub fn dashboard(&self) -> Option<Dashboard<'_>> {
        let dataset = self.dataset.as_deref()?;
        Some(Dashboard::build(dataset, &self.filters, &self.config))
    }

    /// Write the filtered rows to `path`. Returns the number of rows.
    pub fn export_csv(&mut self, path: &Path) -> Result<usize, ExportError> {
        let (rows, written) = {
            let Some(dashboard) = self.dashboard() else {
                return Ok(0);
            };
            (dashboard.view.len(), write_csv(path, &dashboard.view))
        };
        match written {
            Ok(()) => {
                self.status_message = Some(StatusMessage::info(format!(
                    "{rows} lignes exportées vers {}",
                    path.display()
                )));
                Ok(rows)
            }
            Err(e) => {
                log::warn!("CSV export failed: {e}");
                self.status_message =
                    Some(StatusMessage::error(format!("Échec de l'export : {e}")));
                Err(e)
            }
        }
    }
}
