//! Process-wide indicator tables.
//!
//! The store is built once at startup by loading every indicator's CSV file
//! from a data directory, and is read-only afterwards. Requests borrow it
//! immutably and build their own filtered views, so sharing it across threads
//! needs nothing more than an `Arc`.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::{DatasetTable, Indicator};
use crate::error::AppError;
use crate::io::ingest::load_table;

/// Load bookkeeping for one indicator.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub indicator: Indicator,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    tables: BTreeMap<Indicator, DatasetTable>,
    reports: Vec<LoadReport>,
}

impl IndicatorStore {
    /// Load every indicator found in `data_dir`.
    ///
    /// A missing file leaves that indicator unloaded (logged as a warning);
    /// a file that exists but does not match its schema is an error.
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        if !data_dir.is_dir() {
            return Err(AppError::input(format!(
                "Data directory '{}' does not exist.",
                data_dir.display()
            )));
        }

        let mut store = Self::default();
        for indicator in Indicator::ALL {
            let path = data_dir.join(indicator.spec().file_name);
            if !path.is_file() {
                warn!(indicator = %indicator, path = %path.display(), "source file missing; indicator not loaded");
                continue;
            }

            let loaded = load_table(&path, indicator)?;
            info!(
                indicator = %indicator,
                path = %path.display(),
                rows = loaded.table.len(),
                dropped = loaded.dropped.len(),
                "loaded indicator"
            );
            store.reports.push(LoadReport {
                indicator,
                rows_read: loaded.rows_read,
                rows_dropped: loaded.dropped.len(),
            });
            store.tables.insert(indicator, loaded.table);
        }

        info!(loaded = store.tables.len(), total = Indicator::ALL.len(), "indicator store ready");
        Ok(store)
    }

    /// Build a store from already-normalized tables.
    pub fn from_tables(tables: impl IntoIterator<Item = DatasetTable>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.indicator, t)).collect(),
            reports: Vec::new(),
        }
    }

    /// The table for `indicator`, or a not-found error if it was not loaded.
    pub fn table(&self, indicator: Indicator) -> Result<&DatasetTable, AppError> {
        self.tables
            .get(&indicator)
            .ok_or_else(|| AppError::not_found(format!("Indicator '{indicator}' is not loaded.")))
    }

    /// Resolve a user-supplied key and return its table.
    pub fn table_by_key(&self, key: &str) -> Result<&DatasetTable, AppError> {
        let indicator = Indicator::from_key(key)
            .ok_or_else(|| AppError::not_found(format!("Unknown indicator '{key}'.")))?;
        self.table(indicator)
    }

    pub fn is_loaded(&self, indicator: Indicator) -> bool {
        self.tables.contains_key(&indicator)
    }

    /// Loaded tables in catalog order.
    pub fn tables(&self) -> impl Iterator<Item = &DatasetTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn reports(&self) -> &[LoadReport] {
        &self.reports
    }
}
