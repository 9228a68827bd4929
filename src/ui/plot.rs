use std::f64::consts::TAU;

use budget_dashboard::present::charts::{BAR_TITLE, PIE_TITLE, TREND_TITLE};
use budget_dashboard::present::{format_amount, GroupedBars, LineSeries, PieChart};
use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

const CHART_HEIGHT: f32 = 320.0;
/// Arc resolution of a full pie.
const PIE_SEGMENTS: usize = 180;

// ---------------------------------------------------------------------------
// Pie: budget share per category
// ---------------------------------------------------------------------------

pub fn category_pie(ui: &mut Ui, pie: &PieChart) {
    ui.strong(PIE_TITLE);
    if pie.is_empty() {
        ui.label("Aucune donnée pour cette sélection.");
        return;
    }

    Plot::new("category_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in &pie.slices {
                let end = start + slice.fraction;
                let name = format!("{} ({:.1} %)", slice.label, slice.fraction * 100.0);
                let wedge = Polygon::new(PlotPoints::from(wedge_points(start, end)))
                    .name(name)
                    .fill_color(slice.color)
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(wedge);
                start = end;
            }
        });
}

/// Outline of a unit-circle wedge between two fractions of a turn,
/// starting at twelve o'clock and running clockwise.
fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) * PIE_SEGMENTS as f64).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let t = start + (end - start) * i as f64 / steps as f64;
        let angle = TAU * (0.25 - t);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Grouped bars: sub-category × flag
// ---------------------------------------------------------------------------

pub fn subcategory_bars(ui: &mut Ui, bars: &GroupedBars) {
    ui.strong(BAR_TITLE);
    if bars.is_empty() {
        ui.label("Aucune donnée pour cette sélection.");
        return;
    }

    let n_series = bars.series.len() as f64;
    let width = 0.8 / n_series;
    let labels = bars.subcategories.clone();

    Plot::new("subcategory_bars")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Valeur")
        .x_axis_formatter(move |mark, _range| slot_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, series) in bars.series.iter().enumerate() {
                let offset = (i as f64 - (n_series - 1.0) / 2.0) * width;
                let chart_bars: Vec<Bar> = series
                    .points
                    .iter()
                    .map(|p| {
                        Bar::new(p.slot as f64 + offset, p.value)
                            .width(width)
                            .name(&bars.subcategories[p.slot])
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(chart_bars)
                        .name(series.flag.label())
                        .color(series.color),
                );
            }
        });
}

/// Axis label for an x position, blank between slots.
fn slot_label(labels: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Lines: totals per year and flag
// ---------------------------------------------------------------------------

pub fn trend_lines(ui: &mut Ui, lines: &[LineSeries]) {
    ui.strong(TREND_TITLE);

    Plot::new("trend_lines")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Annee")
        .y_axis_label("Valeur")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .label_formatter(|name, point| {
            format!("{name}\n{:.0} : {}", point.x, format_amount(point.y, ""))
        })
        .show(ui, |plot_ui| {
            for series in lines {
                let name = series.flag.label();
                plot_ui.line(
                    Line::new(PlotPoints::from(series.points.clone()))
                        .name(name)
                        .color(series.color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(series.points.clone()))
                        .name(name)
                        .color(series.color)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_top_and_closes_on_end() {
        let pts = wedge_points(0.0, 0.25);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!((pts[1][0]).abs() < 1e-9 && (pts[1][1] - 1.0).abs() < 1e-9);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn slot_labels_only_on_integers() {
        let labels = vec!["Impôts".to_string(), "Personnel".to_string()];
        assert_eq!(slot_label(&labels, 1.0), "Personnel");
        assert_eq!(slot_label(&labels, 0.5), "");
        assert_eq!(slot_label(&labels, 5.0), "");
        assert_eq!(slot_label(&labels, -1.0), "");
    }
}
