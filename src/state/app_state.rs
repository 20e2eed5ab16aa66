use crate::app::MenuItem;
use crate::state::tables::TableView;

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// True from startup (and from a reload request) until the batch resolves.
    pub loading: bool,
    pub last_error: Option<String>,
    /// Local time of the last successful fetch, "HH:MM".
    pub last_loaded_at: Option<String>,
    pub forwards: TableView,
    pub defense: TableView,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// The table behind the active tab. Help falls back to the tab it was opened from.
    pub fn active_table_mut(&mut self) -> &mut TableView {
        match self.table_tab() {
            MenuItem::Defense => &mut self.defense,
            _ => &mut self.forwards,
        }
    }

    fn table_tab(&self) -> MenuItem {
        match self.active_tab {
            MenuItem::Help => self.previous_tab,
            tab => tab,
        }
    }
}
