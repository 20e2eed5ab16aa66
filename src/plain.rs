//! `--plain`: fetch once and print both tables to stdout, no terminal UI.

use crate::draw::format_plus_minus;
use crate::state::app_settings::AppSettings;
use crate::state::tables::{SortColumn, TableView};
use log::{error, info};
use nhl_api::PlayerResult;
use nhl_api::client::NhlApi;
use nhl_api::scoring::split_by_position;
use std::fmt::Write;

pub async fn run(settings: AppSettings) -> anyhow::Result<()> {
    let client = settings.api_client();
    info!("fetching {} players from {}", settings.roster.len(), client.base_url());

    let results = fetch_or_empty(&client, &settings).await;
    print!("{}", render_tables(results));
    Ok(())
}

async fn fetch_or_empty(client: &NhlApi, settings: &AppSettings) -> Vec<PlayerResult> {
    match client.fetch_roster(&settings.roster).await {
        Ok(results) => results,
        Err(e) => {
            error!("Error fetching players: {e}");
            Vec::new()
        }
    }
}

/// Both position tables, each in the default fantasy-points-descending order.
pub fn render_tables(results: Vec<PlayerResult>) -> String {
    let (forwards, defense) = split_by_position(results);
    let mut out = String::new();
    for (label, rows) in [("Forwards", forwards), ("Defense", defense)] {
        let mut view = TableView::default();
        view.load(rows);
        out.push_str(&render_table(label, &view));
        out.push('\n');
    }
    out
}

fn render_table(label: &str, view: &TableView) -> String {
    let name_width = view
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(SortColumn::Name.header().len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "{label}");
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>5}  {:>7}  {:>4}  {:>14}",
        SortColumn::Name.header(),
        SortColumn::Goals.header(),
        SortColumn::Assists.header(),
        SortColumn::PlusMinus.header(),
        SortColumn::FantasyPoints.header(),
    );
    for r in &view.rows {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>5}  {:>7}  {:>4}  {:>14.1}",
            r.name,
            r.goals,
            r.assists,
            format_plus_minus(r.plus_minus),
            r.fantasy_points,
        );
    }
    out
}
