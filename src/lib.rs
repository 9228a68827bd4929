//! Budget Dashboard
//!
//! Loads a national-budget table (the `Budget` sheet of the Finance Act
//! workbook), filters it by type, category and year, and derives the KPIs,
//! charts, detail table and CSV export shown by the desktop app.
//!
//! The pipeline is pure: [`data::filter::apply`] →
//! [`data::aggregate`] → [`present::Dashboard`]. Only the raw load is
//! cached, in an explicit [`data::cache::DatasetCache`].

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod present;
pub mod state;

pub use config::DashboardConfig;
pub use data::filter::{apply, Dimension, DimensionValue, FilterSelection, FilteredView};
pub use data::model::{BudgetRecord, Dataset, Flag};
pub use error::{DataSourceError, ExportError};
pub use present::Dashboard;
