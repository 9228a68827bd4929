use std::path::PathBuf;
use std::sync::Arc;

use super::loader;
use super::model::Dataset;
use crate::error::DataSourceError;

/// What a cached dataset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub sheet: String,
}

impl SourceIdentity {
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }
}

/// Single-slot memo of the last successful load.
///
/// The slot is only replaced when a different [`SourceIdentity`] is
/// requested or after [`DatasetCache::invalidate`].
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Option<(SourceIdentity, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `source`, reading the file on a miss.
    pub fn get_or_load(
        &mut self,
        source: &SourceIdentity,
    ) -> Result<Arc<Dataset>, DataSourceError> {
        self.get_or_load_with(source, |s| loader::load_file(&s.path, &s.sheet))
    }

    /// Same as [`get_or_load`](Self::get_or_load) with a caller-supplied
    /// loader. A failed load leaves the cache empty.
    pub fn get_or_load_with<F>(
        &mut self,
        source: &SourceIdentity,
        load: F,
    ) -> Result<Arc<Dataset>, DataSourceError>
    where
        F: FnOnce(&SourceIdentity) -> Result<Dataset, DataSourceError>,
    {
        if let Some((cached, dataset)) = &self.slot {
            if cached == source {
                log::debug!("Dataset cache hit for {}", source.path.display());
                return Ok(Arc::clone(dataset));
            }
        }

        self.slot = None;
        let dataset = Arc::new(load(source)?);
        self.slot = Some((source.clone(), Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Identity of the cached dataset, if any.
    pub fn current(&self) -> Option<&SourceIdentity> {
        self.slot.as_ref().map(|(id, _)| id)
    }

    /// Drop the cached dataset so the next call reloads it.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::data::model::BudgetRecord;

    fn one_row() -> Dataset {
        Dataset::from_records(vec![BudgetRecord {
            kind: Some("Budget général".into()),
            year: Some(2025),
            amount: Some(10.0),
            ..Default::default()
        }])
    }

    #[test]
    fn same_identity_loads_once() {
        let mut cache = DatasetCache::new();
        let source = SourceIdentity::new("budget.xlsx", "Budget");
        let calls = Cell::new(0);

        let loader = |_: &SourceIdentity| {
            calls.set(calls.get() + 1);
            Ok(one_row())
        };
        let first = cache.get_or_load_with(&source, loader).unwrap();
        let second = cache.get_or_load_with(&source, loader).unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_identity_or_invalidate_reloads() {
        let mut cache = DatasetCache::new();
        let calls = Cell::new(0);
        let loader = |_: &SourceIdentity| {
            calls.set(calls.get() + 1);
            Ok(one_row())
        };

        let a = SourceIdentity::new("budget.xlsx", "Budget");
        let b = SourceIdentity::new("budget.xlsx", "Autre");
        cache.get_or_load_with(&a, loader).unwrap();
        cache.get_or_load_with(&b, loader).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.current(), Some(&b));

        cache.invalidate();
        assert!(cache.current().is_none());
        cache.get_or_load_with(&b, loader).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let mut cache = DatasetCache::new();
        let source = SourceIdentity::new("missing.xlsx", "Budget");

        let err = cache
            .get_or_load_with(&source, |s| Err(DataSourceError::NotFound(s.path.clone())))
            .unwrap_err();
        assert!(matches!(err, DataSourceError::NotFound(_)));
        assert!(cache.current().is_none());
    }
}
