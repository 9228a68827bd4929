/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐     ┌───────┐
///   │  loader   │ ◀── │ cache │  one slot: (source, Arc<Dataset>)
///   └──────────┘     └───────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<BudgetRecord>, distinct values per dimension
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  KPIs and group-by sums
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
