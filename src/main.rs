mod app;
mod draw;
mod keys;
mod plain;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use log::{LevelFilter, error};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Tui,
    Plain,
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Run(Mode),
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(mode)) => mode,
        Ok(Command::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("nhltui {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    match mode {
        Mode::Plain => run_plain().await,
        Mode::Tui => run_tui().await,
    }
}

async fn run_plain() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let settings = AppSettings::load()?;
    plain::run(settings).await
}

async fn run_tui() -> anyhow::Result<()> {
    better_panic::install();

    // Logger first so settings warnings land in the log pane.
    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(LevelFilter::Info);

    let settings = AppSettings::load()?;
    if let Some(level) = settings.log_level {
        log::set_max_level(level);
        tui_logger::set_default_level(level);
    }

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let client = settings.api_client();
    let roster = settings.roster.clone();
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Trigger the first fetch on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    // Input handler thread owns the only UI sender
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx));

    // Network thread
    let network_worker = NetworkWorker::new(client, roster, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    cleanup_terminal();

    Ok(())
}

/// Help and version win over any other flag; the first unknown argument is an error.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut mode = Mode::Tui;
    for arg in args {
        match arg.as_str() {
            "-p" | "--plain" => mode = Mode::Plain,
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(Command::Run(mode))
}

fn usage_text() -> &'static str {
    "nhltui - NHL fantasy points over the last five games

Usage:
  nhltui
  nhltui --plain
  nhltui --help
  nhltui --version

Environment:
  NHLTUI_ROSTER_JSON   Path to a JSON roster: [{\"id\", \"name\", \"position\"}]
  NHLTUI_API_BASE      NHL web API base URL (default https://api-web.nhle.com)
  NHLTUI_TIMEOUT_SECS  Per-request timeout in seconds (default none)
  NHLTUI_LOG           Log level for the log pane (default info)
  RUST_LOG             Log filter for --plain (default warn)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            // Input task and network worker are both gone.
            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::RosterLoaded { results } => {
            let mut guard = app.lock().await;
            guard.on_roster_loaded(results);
        }
        NetworkResponse::Error { message } => {
            error!("Error fetching players: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let Ok(event) = crossterm_event::read() else {
            continue;
        };
        if let Some(ui_event) = ui_event_from(event)
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

/// Key releases and repeats are dropped so a binding fires once per press.
fn ui_event_from(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Some(UiEvent::KeyPressed(key_event))
        }
        Event::Resize(_, _) => Some(UiEvent::Resize),
        _ => None,
    }
}

fn setup_terminal() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )
}

/// Best effort: also runs from the panic hook and the quit key.
pub fn cleanup_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
