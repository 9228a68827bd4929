//! Configuration and constants for the dashboard.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "budget-dashboard.json";

/// Workbook shipped with the dashboard.
pub const DEFAULT_SOURCE_PATH: &str = "Loi de finance 2025_2.xlsx";
pub const DEFAULT_SHEET: &str = "Budget";
pub const DEFAULT_CURRENCY: &str = "FCFA";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "donnees_filtrees.csv";

pub const DEFAULT_TITLE: &str = "Loi de Finances 2025 - Côte d'Ivoire";
pub const DEFAULT_DESCRIPTION: &str = "Analyse interactive et citoyenne du budget national : \
recettes, dépenses et répartition par catégories. \
Utilisez les filtres à gauche pour explorer les données.";
pub const DEFAULT_SOURCE_NOTE: &str = "Loi de finance n° 2024-1109 du 18 décembre 2024";

// Source column names, matched after trimming surrounding whitespace.
pub const COL_KIND: &str = "Nom indicateur 2";
pub const COL_FLAG: &str = "Nom indicateur 4";
pub const COL_CATEGORY: &str = "Nom indicateur 5";
pub const COL_SUBCATEGORY: &str = "Nom indicateur 6";
pub const COL_YEAR: &str = "Annee";
pub const COL_AMOUNT: &str = "Valeur";

/// Export column order. Also the set of columns a source must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_KIND,
    COL_FLAG,
    COL_CATEGORY,
    COL_SUBCATEGORY,
    COL_YEAR,
    COL_AMOUNT,
];

/// Fixed flag colours (RGB).
pub const RESOURCES_RGB: [u8; 3] = [0x2c, 0xa0, 0x2c];
pub const EXPENSES_RGB: [u8; 3] = [0xd6, 0x27, 0x28];

/// Runtime settings. Every field falls back to its default when absent
/// from the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source_path: PathBuf,
    pub sheet: String,
    pub currency: String,
    pub export_file_name: String,
    pub title: String,
    pub description: String,
    pub source_note: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            sheet: DEFAULT_SHEET.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            source_note: DEFAULT_SOURCE_NOTE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read the configuration from `path`, or return the defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, DataSourceError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(DataSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| DataSourceError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
