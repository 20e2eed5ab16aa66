//! Last-5-games aggregation and fantasy point weighting.

use crate::{GameStat, PlayerRef, PlayerResult, Position};

const ASSIST_WEIGHT: f64 = 1.0;
const PLUS_MINUS_WEIGHT: f64 = 0.5;

/// Plain sums over a game window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub goals: u32,
    pub assists: u32,
    pub plus_minus: i32,
}

/// Sums clamp at the integer bounds rather than wrapping.
pub fn sum_games(games: &[GameStat]) -> Totals {
    games.iter().fold(Totals::default(), |acc, g| Totals {
        goals: acc.goals.saturating_add(g.goals),
        assists: acc.assists.saturating_add(g.assists),
        plus_minus: acc.plus_minus.saturating_add(g.plus_minus),
    })
}

/// Goals are weighted by position; assists and plus/minus are not.
pub fn fantasy_points(totals: Totals, position: Position) -> f64 {
    f64::from(totals.goals) * position.goal_weight()
        + f64::from(totals.assists) * ASSIST_WEIGHT
        + f64::from(totals.plus_minus) * PLUS_MINUS_WEIGHT
}

pub fn aggregate(player: &PlayerRef, games: &[GameStat]) -> PlayerResult {
    let totals = sum_games(games);
    let position = player.scoring_position();
    PlayerResult {
        name: player.name.clone(),
        position,
        goals: totals.goals,
        assists: totals.assists,
        plus_minus: totals.plus_minus,
        fantasy_points: fantasy_points(totals, position),
        games_played: games.len(),
    }
}

/// Pairs each player with its game window by index. `games` must be in roster order.
pub fn aggregate_all(roster: &[PlayerRef], games: &[Vec<GameStat>]) -> Vec<PlayerResult> {
    roster
        .iter()
        .zip(games)
        .map(|(player, window)| aggregate(player, window))
        .collect()
}

/// Split results into (forwards, defense), keeping input order within each side.
pub fn split_by_position(results: Vec<PlayerResult>) -> (Vec<PlayerResult>, Vec<PlayerResult>) {
    results
        .into_iter()
        .partition(|r| r.position == Position::Forward)
}
