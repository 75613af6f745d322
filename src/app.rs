use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::pages::{self, LoginForm};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvScopeApp {
    pub state: AppState,
    login: LoginForm,
}

impl CsvScopeApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            login: LoginForm::default(),
        }
    }
}

impl eframe::App for CsvScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Logged out: only the login form renders.
        if !self.state.session.is_authenticated() {
            egui::CentralPanel::default().show(ctx, |ui| {
                pages::login_page(ui, &mut self.login, &mut self.state);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation and pipeline controls ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Dashboard => pages::dashboard_page(ui, &mut self.state),
            Page::Analytics => pages::analytics_page(ui, &mut self.state),
            Page::Admin => pages::admin_page(ui, &mut self.state),
        });
    }
}
