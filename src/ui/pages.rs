use eframe::egui::{self, Color32, RichText, TextEdit, Ui};

use crate::data::stats;
use crate::session::{AuthError, Role};
use crate::state::{AppState, Severity, StatusLine};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Login page
// ---------------------------------------------------------------------------

/// Transient widget state for the login form.
#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<AuthError>,
}

pub fn login_page(ui: &mut Ui, form: &mut LoginForm, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(80.0);
        ui.heading("CSV Scope");
        ui.label("Sign in to continue");
        ui.add_space(12.0);

        ui.add(TextEdit::singleline(&mut form.username).hint_text("username"));
        ui.add(
            TextEdit::singleline(&mut form.password)
                .hint_text("password")
                .password(true),
        );
        ui.add_space(8.0);

        let submitted =
            ui.button("Login").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submitted {
            match state
                .session
                .login(&form.username, &form.password, &state.config.accounts)
            {
                Ok(()) => *form = LoginForm::default(),
                Err(e) => form.error = Some(e),
            }
        }

        if let Some(e) = &form.error {
            ui.add_space(8.0);
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard page – preview, chart
// ---------------------------------------------------------------------------

pub fn dashboard_page(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to explore it  (File → Open…)");
        });
        return;
    };

    egui::TopBottomPanel::top("dashboard_preview")
        .resizable(true)
        .default_height(280.0)
        .show_inside(ui, |ui: &mut Ui| {
            ui.heading("Preview");
            table::preview_table(ui, table.as_ref(), state.config.preview_rows);
        });

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        if state.filter.is_none() {
            // Zero numeric columns: the pipeline stops after the preview.
            ui.label(RichText::new("No numeric columns found in this file.").color(Color32::GOLD));
            return;
        }
        ui.heading("Chart");
        plot::chart_panel(ui, state);
    });
}

// ---------------------------------------------------------------------------
// Analytics page – describe() and per-column distribution
// ---------------------------------------------------------------------------

pub fn analytics_page(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to see its statistics  (File → Open…)");
        });
        return;
    };

    let summaries = stats::describe(table.as_ref());
    if summaries.is_empty() {
        ui.label(RichText::new("No numeric columns to summarize.").color(Color32::GOLD));
        return;
    }

    egui::TopBottomPanel::top("analytics_summary")
        .resizable(true)
        .default_height(220.0)
        .show_inside(ui, |ui: &mut Ui| {
            ui.heading("Summary statistics");
            table::describe_table(ui, &summaries);
        });

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.heading("Distribution");
            let current = state.analytics_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("analytics_column")
                .selected_text(current.clone())
                .show_ui(ui, |ui: &mut Ui| {
                    for s in &summaries {
                        if ui.selectable_label(current == s.name, &s.name).clicked() {
                            state.analytics_column = Some(s.name.clone());
                        }
                    }
                });
        });

        if let Some(column) = state.analytics_column.clone() {
            plot::column_histogram(ui, state, table.as_ref(), &column);
        }
    });
}

// ---------------------------------------------------------------------------
// Admin page – role gated
// ---------------------------------------------------------------------------

pub fn admin_page(ui: &mut Ui, state: &mut AppState) {
    // Fail closed: nothing below renders without the admin role.
    if let Err(e) = state.session.require_auth(Role::Admin) {
        ui.label(RichText::new(format!("Access denied: {e}")).color(Color32::RED));
        return;
    }

    ui.heading("Parse cache");
    if state.cache.is_empty() {
        ui.label("Cache is empty.");
    } else {
        for (path, rows) in state.cache.summaries() {
            ui.label(format!("{} — {rows} rows", path.display()));
        }
    }
    if ui.button("Clear cache").clicked() {
        let evicted = state.cache.len();
        state.cache.clear();
        log::info!("parse cache cleared ({evicted} entries)");
        state.status = Some(StatusLine {
            severity: Severity::Info,
            text: format!("Cleared {evicted} cached tables"),
        });
    }

    ui.separator();
    ui.heading("Configuration");
    ui.label(format!("Preview rows: {}", state.config.preview_rows));
    ui.label(match state.config.histogram_bins {
        Some(bins) => format!("Histogram bins: {bins}"),
        None => "Histogram bins: automatic".to_string(),
    });
    ui.label(format!("Accounts: {}", state.config.accounts.len()));
}
