use std::collections::{BTreeMap, BTreeSet};

use super::filter::FilteredView;
use super::model::Flag;

// ---------------------------------------------------------------------------
// Headline totals
// ---------------------------------------------------------------------------

/// The three headline totals of a view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiSummary {
    pub total: f64,
    pub resources: f64,
    pub expenses: f64,
}

/// Sum amounts over the view, split by flag. Missing amounts count as zero.
pub fn summarize(view: &FilteredView<'_>) -> KpiSummary {
    view.records().fold(KpiSummary::default(), |mut acc, rec| {
        let amount = rec.amount_or_zero();
        acc.total += amount;
        match rec.flag {
            Some(Flag::Resources) => acc.resources += amount,
            Some(Flag::Expenses) => acc.expenses += amount,
            _ => {}
        }
        acc
    })
}

// ---------------------------------------------------------------------------
// Group-by sums
// ---------------------------------------------------------------------------

/// Total per budget category.
pub fn group_by_category(view: &FilteredView<'_>) -> BTreeMap<String, f64> {
    let mut groups = BTreeMap::new();
    for rec in view.records() {
        if let Some(category) = &rec.category {
            *groups.entry(category.clone()).or_insert(0.0) += rec.amount_or_zero();
        }
    }
    groups
}

/// Total per (sub-category, flag). Rows missing either key are skipped.
pub fn group_by_subcategory_and_flag(view: &FilteredView<'_>) -> BTreeMap<(String, Flag), f64> {
    let mut groups = BTreeMap::new();
    for rec in view.records() {
        if let (Some(sub), Some(flag)) = (&rec.subcategory, &rec.flag) {
            *groups.entry((sub.clone(), flag.clone())).or_insert(0.0) += rec.amount_or_zero();
        }
    }
    groups
}

/// One point of the yearly trend.
#[derive(Debug, Clone, PartialEq)]
pub struct YearFlagTotal {
    pub year: i32,
    pub flag: Flag,
    pub total: f64,
}

/// Totals per (year, flag), ascending by year then flag.
pub fn group_by_year_and_flag(view: &FilteredView<'_>) -> Vec<YearFlagTotal> {
    let mut groups: BTreeMap<(i32, Flag), f64> = BTreeMap::new();
    for rec in view.records() {
        if let (Some(year), Some(flag)) = (rec.year, &rec.flag) {
            *groups.entry((year, flag.clone())).or_insert(0.0) += rec.amount_or_zero();
        }
    }
    groups
        .into_iter()
        .map(|((year, flag), total)| YearFlagTotal { year, flag, total })
        .collect()
}

/// Distinct years present in the view.
pub fn distinct_years(view: &FilteredView<'_>) -> BTreeSet<i32> {
    view.records().filter_map(|rec| rec.year).collect()
}

/// The yearly trend, only when the view spans more than one year.
pub fn year_trend(view: &FilteredView<'_>) -> Option<Vec<YearFlagTotal>> {
    if distinct_years(view).len() > 1 {
        Some(group_by_year_and_flag(view))
    } else {
        None
    }
}
