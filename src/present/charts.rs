use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;

use crate::color::{flag_color, sequential_blues};
use crate::data::aggregate::YearFlagTotal;
use crate::data::model::Flag;

pub const PIE_TITLE: &str = "Répartition du budget par catégorie";
pub const BAR_TITLE: &str = "Répartition par sous-catégorie";
pub const TREND_TITLE: &str = "Évolution des ressources et dépenses par année";

// ---------------------------------------------------------------------------
// Pie: share of each category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the positive total, in `0.0..=1.0`.
    pub fraction: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub total: f64,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Largest category first. A pie cannot draw negative or zero wedges, so
/// those categories are left out.
pub fn category_pie(groups: &BTreeMap<String, f64>) -> PieChart {
    let mut parts: Vec<(&String, f64)> = groups
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(k, v)| (k, *v))
        .collect();
    parts.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total: f64 = parts.iter().map(|(_, v)| v).sum();
    let colors = sequential_blues(parts.len());

    let slices = parts
        .into_iter()
        .zip(colors)
        .map(|((label, value), color)| PieSlice {
            label: label.clone(),
            value,
            fraction: value / total,
            color,
        })
        .collect();

    PieChart { slices, total }
}

// ---------------------------------------------------------------------------
// Grouped bars: sub-category × flag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    /// Position of the sub-category on the x axis.
    pub slot: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub flag: Flag,
    pub color: Color32,
    pub points: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedBars {
    /// x-axis labels, indexed by [`BarPoint::slot`].
    pub subcategories: Vec<String>,
    /// One series per flag, resources first.
    pub series: Vec<BarSeries>,
}

impl GroupedBars {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub fn subcategory_bars(groups: &BTreeMap<(String, Flag), f64>) -> GroupedBars {
    let subcategories: Vec<String> = groups
        .keys()
        .map(|(sub, _)| sub.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_flag: BTreeMap<&Flag, Vec<BarPoint>> = BTreeMap::new();
    for ((sub, flag), value) in groups {
        // Keys come from `groups`, so the lookup always succeeds.
        let slot = subcategories.binary_search(sub).unwrap_or_default();
        by_flag.entry(flag).or_default().push(BarPoint {
            slot,
            value: *value,
        });
    }

    let series = by_flag
        .into_iter()
        .map(|(flag, points)| BarSeries {
            flag: flag.clone(),
            color: flag_color(flag),
            points,
        })
        .collect();

    GroupedBars {
        subcategories,
        series,
    }
}

// ---------------------------------------------------------------------------
// Lines: yearly trend per flag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub flag: Flag,
    pub color: Color32,
    /// `[year, total]`, ascending by year.
    pub points: Vec<[f64; 2]>,
}

/// `None` in, `None` out: the trend chart is hidden for a single year.
pub fn trend_lines(trend: Option<Vec<YearFlagTotal>>) -> Option<Vec<LineSeries>> {
    let trend = trend?;
    let mut by_flag: BTreeMap<Flag, Vec<[f64; 2]>> = BTreeMap::new();
    for point in trend {
        by_flag
            .entry(point.flag)
            .or_default()
            .push([point.year as f64, point.total]);
    }

    Some(
        by_flag
            .into_iter()
            .map(|(flag, mut points)| {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                LineSeries {
                    color: flag_color(&flag),
                    flag,
                    points,
                }
            })
            .collect(),
    )
}
