use eframe::App as EApp;
use egui::TextureHandle;
use log::{info, warn};

use super::controller::{Dashboard, DashboardView};
use crate::types::{DateSelection, Tab};

/// Main application state
pub struct App {
    pub dashboard: Dashboard,
    pub active_tab: Tab,
    /// Raw contents of the start/end date fields
    pub start_input: String,
    pub end_input: String,
    /// Last selection that passed validation
    pub selection: DateSelection,
    pub date_error: Option<String>,
    pub view: DashboardView,
    /// One slot per panel of the current view
    pub chart_textures: Vec<Option<TextureHandle>>,
    pub intro_textures: Vec<TextureHandle>,
    pub update_needed: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let active_tab = Tab::default();
        let selection = DateSelection::unfiltered();
        let view = dashboard.render(active_tab, &selection);

        Self {
            dashboard,
            active_tab,
            start_input: String::new(),
            end_input: String::new(),
            selection,
            date_error: None,
            view,
            chart_textures: Vec::new(),
            intro_textures: Vec::new(),
            update_needed: true,
        }
    }

    /// Validate the date fields and, when they parse, make them the active
    /// filter. A rejected input keeps the previous selection.
    pub fn apply_dates(&mut self) {
        let bounds = self.dashboard.config().date_bounds();
        match DateSelection::parse(&self.start_input, &self.end_input, bounds) {
            Ok(selection) => {
                info!("Date selection {:?} to {:?}", selection.start, selection.end);
                self.date_error = None;
                self.selection = selection;
                self.refresh();
            }
            Err(e) => {
                warn!("Rejected date input: {}", e);
                self.date_error = Some(e.to_string());
            }
        }
    }

    pub fn clear_dates(&mut self) {
        self.start_input.clear();
        self.end_input.clear();
        self.date_error = None;
        self.selection = DateSelection::unfiltered();
        self.refresh();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            self.active_tab = tab;
            self.refresh();
        }
    }

    /// Rebuild the view for the current tab and selection.
    pub fn refresh(&mut self) {
        self.view = self.dashboard.render(self.active_tab, &self.selection);
        self.update_needed = true;
    }

    /// Hint shown next to the date fields.
    pub fn date_hint(&self) -> String {
        let config = self.dashboard.config();
        format!("Start Date = {}, End Date={}", config.min_date, config.max_date)
    }
}

impl EApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}
