use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crate::state::tables::SortColumn;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Forwards),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Defense),
        (_, KeyCode::Tab, _) => guard.toggle_position_tab(),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),
        (MenuItem::Help, _, _) => {}

        // Reload the whole batch
        (_, Char('R'), _) => {
            if guard.state.loading {
                return;
            }
            guard.on_reload_requested();
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
            return;
        }

        // Sorting
        (_, Char('n'), _) => guard.sort_active_table(SortColumn::Name),
        (_, Char('g'), _) => guard.sort_active_table(SortColumn::Goals),
        (_, Char('a'), _) => guard.sort_active_table(SortColumn::Assists),
        (_, Char('m'), _) => guard.sort_active_table(SortColumn::PlusMinus),
        (_, Char('f'), _) => guard.sort_active_table(SortColumn::FantasyPoints),

        // Row selection
        (_, Char('j') | KeyCode::Down, _) => guard.select_next_row(),
        (_, Char('k') | KeyCode::Up, _) => guard.select_prev_row(),

        // Global
        (_, Char('F'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
