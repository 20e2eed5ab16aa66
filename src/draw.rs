use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::tables::{SortColumn, TableView};
use crate::ui::layout::LayoutAreas;
use nhl_api::{PlayerResult, Position};

static TABS: &[&str; 2] = &["Forwards", "Defense"];

const HELP_TEXT: &str = "q=quit  1=Forwards  2=Defense  Tab=switch  j/k=move
n=name  g=goals  a=assists  m=+/-  f=fantasy points  (again to flip order)
R=reload  F=full screen  \"=logs  Esc=back";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        match app.state.active_tab {
            MenuItem::Forwards => draw_player_table(f, layout.main, app, Position::Forward),
            MenuItem::Defense => draw_player_table(f, layout.main, app, Position::Defense),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Forwards => 0,
        MenuItem::Defense => 1,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Defense => 1,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_player_table(f: &mut Frame, area: Rect, app: &App, position: Position) {
    let title = format!(" {} · last 5 games ", position.label());
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.loading {
        draw_centered_message(f, inner, "Loading data...");
        return;
    }

    let view = match position {
        Position::Forward => &app.state.forwards,
        Position::Defense => &app.state.defense,
    };

    let [status, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(status_line(app)).style(Style::default().fg(Color::DarkGray)),
        status,
    );

    if view.rows.is_empty() {
        return;
    }

    let header = Row::new(SortColumn::ALL.iter().map(|c| Cell::from(header_label(view, *c))))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = view.rows.iter().map(player_row);
    let widths = [
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(17),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(view.selected));
    f.render_stateful_widget(table, content, &mut table_state);
}

fn header_label(view: &TableView, column: SortColumn) -> String {
    if view.sort.column != column {
        return column.header().to_string();
    }
    let arrow = if view.sort.descending { '▼' } else { '▲' };
    format!("{} {arrow}", column.header())
}

fn player_row(r: &PlayerResult) -> Row<'static> {
    let plus_minus_style = match r.plus_minus {
        pm if pm > 0 => Style::default().fg(Color::Green),
        pm if pm < 0 => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    Row::new(vec![
        Cell::from(r.name.clone()),
        Cell::from(r.goals.to_string()),
        Cell::from(r.assists.to_string()),
        Cell::from(format_plus_minus(r.plus_minus)).style(plus_minus_style),
        Cell::from(format!("{:.1}", r.fantasy_points)),
    ])
}

pub fn format_plus_minus(pm: i32) -> String {
    if pm > 0 { format!("+{pm}") } else { pm.to_string() }
}

fn status_line(app: &App) -> String {
    match (&app.state.last_error, &app.state.last_loaded_at) {
        (Some(_), _) => "No data · R to reload".to_string(),
        (None, Some(at)) => format!("Updated {at} · R to reload"),
        (None, None) => String::new(),
    }
}

fn draw_centered_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    draw_centered_message(f, inner, msg);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
