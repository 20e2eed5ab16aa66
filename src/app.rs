use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::tables::SortColumn;
use chrono::Local;
use log::info;
use nhl_api::PlayerResult;
use nhl_api::scoring::split_by_position;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Forwards,
    Defense,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            state: AppState::new(),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_roster_loaded(&mut self, results: Vec<PlayerResult>) {
        let (forwards, defense) = split_by_position(results);
        info!("{} forwards, {} defensemen", forwards.len(), defense.len());
        self.state.forwards.load(forwards);
        self.state.defense.load(defense);
        self.state.loading = false;
        self.state.last_error = None;
        self.state.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    /// A failed batch leaves nothing behind: both tables are emptied.
    pub fn on_error(&mut self, message: String) {
        self.state.forwards.clear();
        self.state.defense.clear();
        self.state.loading = false;
        self.state.last_error = Some(message);
    }

    pub fn on_reload_requested(&mut self) {
        self.state.loading = true;
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn toggle_position_tab(&mut self) {
        let next = match self.state.active_tab {
            MenuItem::Forwards => MenuItem::Defense,
            MenuItem::Defense => MenuItem::Forwards,
            MenuItem::Help => return,
        };
        self.update_tab(next);
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Table interaction: applies to the visible table only
    // -----------------------------------------------------------------------

    pub fn sort_active_table(&mut self, column: SortColumn) {
        self.state.active_table_mut().sort_by(column);
    }

    pub fn select_next_row(&mut self) {
        self.state.active_table_mut().select_next();
    }

    pub fn select_prev_row(&mut self) {
        self.state.active_table_mut().select_prev();
    }
}
