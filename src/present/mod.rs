//! Presentation layer: turns a filtered view into display and export
//! shapes. Nothing here draws; the `ui` module feeds these into egui.

pub mod charts;
pub mod export;
pub mod format;
pub mod table;

pub use charts::{category_pie, subcategory_bars, trend_lines, GroupedBars, LineSeries, PieChart};
pub use export::{csv_bytes, write_csv};
pub use format::{format_amount, kpi_cards, KpiCard};
pub use table::{detail_table, DetailTable};

use crate::config::DashboardConfig;
use crate::data::aggregate::{
    group_by_category, group_by_subcategory_and_flag, summarize, year_trend, KpiSummary,
};
use crate::data::filter::{apply, FilterSelection, FilteredView};
use crate::data::model::Dataset;

/// Everything one render cycle needs, recomputed from scratch.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    pub view: FilteredView<'a>,
    pub summary: KpiSummary,
    pub kpis: [KpiCard; 3],
    pub pie: PieChart,
    pub bars: GroupedBars,
    /// `None` when the view covers a single year (or none).
    pub trend: Option<Vec<LineSeries>>,
}

impl<'a> Dashboard<'a> {
    pub fn build(
        dataset: &'a Dataset,
        selection: &FilterSelection,
        config: &DashboardConfig,
    ) -> Self {
        let view = apply(dataset, selection);
        let summary = summarize(&view);

        Dashboard {
            kpis: kpi_cards(&summary, &config.currency),
            pie: category_pie(&group_by_category(&view)),
            bars: subcategory_bars(&group_by_subcategory_and_flag(&view)),
            trend: trend_lines(year_trend(&view)),
            summary,
            view,
        }
    }

    pub fn table(&self) -> DetailTable {
        detail_table(&self.view)
    }
}
