use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::export::{self, EXPORT_FILE_NAME};
use crate::data::filter;
use crate::state::{AppState, ChartKind, Page, Severity, StatusLine};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let name = state.source_name.as_deref().unwrap_or("table");
            ui.label(format!(
                "{name}: {} rows × {} columns, {} visible",
                table.n_rows,
                table.n_cols(),
                state.visible_rows.len()
            ));
            ui.separator();
        }

        if let Some(user) = state.session.user() {
            ui.label(format!("{user} ({})", state.session.role()));
            ui.separator();
        }

        if let Some(status) = &state.status {
            ui.label(status_text(status));
        }
    });
}

fn status_text(status: &StatusLine) -> RichText {
    let color = match status.severity {
        Severity::Info => Color32::LIGHT_BLUE,
        Severity::Warning => Color32::GOLD,
        Severity::Error => Color32::RED,
    };
    RichText::new(&status.text).color(color)
}

// ---------------------------------------------------------------------------
// Left side panel – navigation and pipeline controls
// ---------------------------------------------------------------------------

/// Render the left panel: page navigation, then the filter / chart /
/// export controls when the Dashboard page is active.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.label())
            .clicked()
        {
            state.page = page;
        }
    }
    if ui.selectable_label(false, "Logout").clicked() {
        state.session.logout();
        return;
    }
    ui.separator();

    if state.page != Page::Dashboard {
        return;
    }

    let has_table = state.table.is_some();
    if !has_table {
        ui.label("No file loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_controls(ui, state);
            ui.separator();
            chart_controls(ui, state);
            ui.separator();
            export_controls(ui, state);
        });
}

fn filter_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Filter");

    let Some(table) = state.table.clone() else {
        return;
    };
    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        ui.label("No numeric columns to filter on.");
        return;
    }
    let Some(current) = state.filter.clone() else {
        return;
    };

    // Column selector, numeric columns only.
    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(current.column.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in &numeric {
                if ui
                    .selectable_label(current.column == *col, col)
                    .clicked()
                {
                    state.set_filter_column(col);
                }
            }
        });

    // Range controls bounded by the column's observed min/max.
    let Some((min, max)) = filter::observed_range(table.as_ref(), &current.column) else {
        return;
    };

    if min == max {
        ui.label(format!("Single value: {min}"));
        return;
    }

    let mut lo = current.lo;
    let mut hi = current.hi;
    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut lo, min..=max).text("min"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut hi, min..=max).text("max"))
        .changed();
    if changed {
        state.set_filter_range(lo, hi);
    }
}

fn chart_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Chart");

    let Some(table) = state.table.clone() else {
        return;
    };
    let numeric = table.numeric_columns();
    if state.filter.is_none() || numeric.is_empty() {
        ui.label("Charts need a numeric column.");
        return;
    }

    egui::ComboBox::from_id_salt("chart_kind")
        .selected_text(state.chart.kind.label())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(state.chart.kind == kind, kind.label())
                    .clicked()
                {
                    state.chart.kind = kind;
                }
            }
        });

    axis_selector(ui, "x column", "chart_x", &numeric, &mut state.chart.x);
    if state.chart.kind.needs_y() {
        axis_selector(ui, "y column", "chart_y", &numeric, &mut state.chart.y);
    }
}

fn axis_selector(
    ui: &mut Ui,
    label: &str,
    id: &str,
    numeric: &[String],
    selection: &mut Option<String>,
) {
    let current = selection.clone().unwrap_or_default();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in numeric {
                    if ui.selectable_label(current == *col, col).clicked() {
                        *selection = Some(col.clone());
                    }
                }
            });
    });
}

fn export_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Export");

    // Export consumes the filtered table; halted without a filter.
    if state.filter.is_none() {
        ui.label("Nothing to export.");
        return;
    }

    if ui.button("Download filtered CSV…").clicked() {
        export_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        return;
    };

    let target = rfd::FileDialog::new()
        .set_title("Save filtered CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = target else {
        return;
    };

    let result = export::to_csv_bytes(table.as_ref(), &state.visible_rows)
        .and_then(|bytes| std::fs::write(&path, bytes).map_err(Into::into));

    match result {
        Ok(()) => {
            log::info!(
                "exported {} rows to {}",
                state.visible_rows.len(),
                path.display()
            );
            state.status = Some(StatusLine {
                severity: Severity::Info,
                text: format!(
                    "Saved {} rows to {}",
                    state.visible_rows.len(),
                    path.display()
                ),
            });
        }
        Err(e) => {
            log::error!("export failed: {e:#}");
            state.status = Some(StatusLine {
                severity: Severity::Error,
                text: format!("Export failed: {e:#}"),
            });
        }
    }
}
