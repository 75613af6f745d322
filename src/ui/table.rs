use eframe::egui::Ui;
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Table;
use crate::data::stats::ColumnSummary;

// ---------------------------------------------------------------------------
// Preview table
// ---------------------------------------------------------------------------

/// Scrollable preview of the table, capped at `max_rows` rendered rows.
pub fn preview_table(ui: &mut Ui, table: &Table, max_rows: usize) {
    let shown = table.n_rows.min(max_rows);

    ui.push_id("preview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(TableColumn::auto().at_least(60.0), table.n_cols())
            .header(20.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui| {
                        ui.strong(&col.name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, shown, |mut row| {
                    let idx = row.index();
                    for col in &table.columns {
                        row.col(|ui| {
                            ui.label(col.cell_text(idx));
                        });
                    }
                });
            });
    });

    if table.n_rows > shown {
        ui.label(format!("… {} more rows not shown", table.n_rows - shown));
    }
}

// ---------------------------------------------------------------------------
// Summary statistics table
// ---------------------------------------------------------------------------

const STAT_HEADERS: [&str; 9] = [
    "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// describe() output as a table, one row per numeric column.
pub fn describe_table(ui: &mut Ui, summaries: &[ColumnSummary]) {
    ui.push_id("describe_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(TableColumn::auto().at_least(60.0), STAT_HEADERS.len())
            .header(20.0, |mut header| {
                for title in STAT_HEADERS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, summaries.len(), |mut row| {
                    let s = &summaries[row.index()];
                    let cells = [
                        s.name.clone(),
                        s.count.to_string(),
                        format_stat(s.mean),
                        format_stat(s.std),
                        format_stat(s.min),
                        format_stat(s.q25),
                        format_stat(s.median),
                        format_stat(s.q75),
                        format_stat(s.max),
                    ];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

fn format_stat(v: f64) -> String {
    format!("{v:.4}")
}
