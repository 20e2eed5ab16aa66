use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nhl_api::PlayerResult;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Fetch the whole roster again; the previous results are discarded.
    LoadRoster,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RosterLoaded { results: Vec<PlayerResult> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
