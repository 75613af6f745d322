use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::model::Table;
use crate::data::stats;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Chart of the filtered table (central panel)
// ---------------------------------------------------------------------------

/// Render the configured chart over the rows passing the current filter.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to explore it  (File → Open…)");
        });
        return;
    };

    // No numeric columns: visualization stage is halted.
    if state.filter.is_none() {
        return;
    }

    let Some(x_name) = state.chart.x.clone() else {
        ui.label("Pick an x column to chart.");
        return;
    };

    match state.chart.kind {
        ChartKind::Histogram => {
            let values = column_values(table, &state.visible_rows, &x_name);
            let bins = stats::histogram(&values, state.histogram_bins(values.len()));
            render_histogram(ui, &x_name, &bins);
        }
        kind => {
            let Some(y_name) = state.chart.y.clone() else {
                ui.label("Pick a y column to chart.");
                return;
            };
            let pairs = xy_pairs(table, &state.visible_rows, &x_name, &y_name);
            match kind {
                ChartKind::Scatter => render_scatter(ui, &x_name, &y_name, pairs),
                ChartKind::Line => render_line(ui, &x_name, &y_name, pairs),
                ChartKind::Box => render_box(ui, &x_name, &y_name, pairs),
                ChartKind::Histogram => unreachable!("handled above"),
            }
        }
    }
}

/// Histogram of a single column, independent of the dashboard chart spec.
/// Used by the analytics page.
pub fn column_histogram(ui: &mut Ui, state: &AppState, table: &Table, column: &str) {
    let all_rows: Vec<usize> = (0..table.n_rows).collect();
    let values = column_values(table, &all_rows, column);
    let bins = stats::histogram(&values, state.histogram_bins(values.len()));
    render_histogram(ui, column, &bins);
}

// ---------------------------------------------------------------------------
// Value gathering
// ---------------------------------------------------------------------------

/// Non-missing values of a numeric column restricted to the given rows.
fn column_values(table: &Table, rows: &[usize], name: &str) -> Vec<f64> {
    let Some(values) = table.numeric_column(name) else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|&r| values.get(r).copied().flatten())
        .collect()
}

/// (x, y) pairs over the given rows; rows missing either value are skipped.
fn xy_pairs(table: &Table, rows: &[usize], x_name: &str, y_name: &str) -> Vec<[f64; 2]> {
    let (Some(xs), Some(ys)) = (table.numeric_column(x_name), table.numeric_column(y_name))
    else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|&r| {
            let x = xs.get(r).copied().flatten()?;
            let y = ys.get(r).copied().flatten()?;
            Some([x, y])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

fn render_scatter(ui: &mut Ui, x_name: &str, y_name: &str, pairs: Vec<[f64; 2]>) {
    Plot::new("chart_scatter")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_name.to_string())
        .y_axis_label(y_name.to_string())
        .show(ui, |plot_ui| {
            let points: PlotPoints = pairs.into_iter().collect();
            plot_ui.points(
                Points::new(points)
                    .name(format!("{y_name} vs {x_name}"))
                    .color(color::series_color(0, 1))
                    .radius(2.5),
            );
        });
}

fn render_line(ui: &mut Ui, x_name: &str, y_name: &str, mut pairs: Vec<[f64; 2]>) {
    // A line only makes sense with x ascending.
    pairs.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Plot::new("chart_line")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_name.to_string())
        .y_axis_label(y_name.to_string())
        .show(ui, |plot_ui| {
            let points: PlotPoints = pairs.into_iter().collect();
            plot_ui.line(
                Line::new(points)
                    .name(format!("{y_name} over {x_name}"))
                    .color(color::series_color(0, 1))
                    .width(1.5),
            );
        });
}

fn render_histogram(ui: &mut Ui, x_name: &str, bins: &[stats::HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width().max(f64::EPSILON)))
        .collect();

    Plot::new("chart_histogram")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_name.to_string())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(x_name.to_string())
                    .color(color::series_color(0, 1)),
            );
        });
}

/// One box per distinct x value, summarizing the y values grouped under it.
fn render_box(ui: &mut Ui, x_name: &str, y_name: &str, mut pairs: Vec<[f64; 2]>) {
    pairs.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));

    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for [x, y] in pairs {
        match groups.last_mut() {
            Some((gx, ys)) if *gx == x => ys.push(y),
            _ => groups.push((x, vec![y])),
        }
    }

    let box_width = group_width(&groups);
    let n_groups = groups.len();
    let boxes: Vec<BoxElem> = groups
        .into_iter()
        .enumerate()
        .map(|(i, (x, ys))| {
            // ys is sorted by construction of the pair ordering above.
            let spread = BoxSpread::new(
                ys[0],
                stats::percentile(&ys, 25.0),
                stats::percentile(&ys, 50.0),
                stats::percentile(&ys, 75.0),
                ys[ys.len() - 1],
            );
            BoxElem::new(x, spread)
                .box_width(box_width)
                .fill(color::series_color(i, n_groups))
        })
        .collect();

    Plot::new("chart_box")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_name.to_string())
        .y_axis_label(y_name.to_string())
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes).name(format!("{y_name} by {x_name}")));
        });
}

/// Box width from the smallest gap between adjacent groups.
fn group_width(groups: &[(f64, Vec<f64>)]) -> f64 {
    let mut min_gap = f64::INFINITY;
    for pair in groups.windows(2) {
        min_gap = min_gap.min(pair[1].0 - pair[0].0);
    }
    if min_gap.is_finite() && min_gap > 0.0 {
        min_gap * 0.6
    } else {
        0.5
    }
}
