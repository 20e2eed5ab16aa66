//! NHL web API raw wire types: serde shapes for the player landing endpoint.
//! Endpoint: https://api-web.nhle.com/v1/player/{id}/landing
//! These map to our clean domain types via the From impls below.
use serde::Deserialize;

use crate::GameStat;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LandingResponse {
    /// Absent for players without recent games, occasionally `null`.
    #[serde(rename = "last5Games", default)]
    pub last_5_games: Option<Vec<RecentGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub game_date: Option<String>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub plus_minus: Option<i32>,
}

impl From<&RecentGame> for GameStat {
    fn from(g: &RecentGame) -> Self {
        GameStat {
            goals: g.goals.unwrap_or_default(),
            assists: g.assists.unwrap_or_default(),
            plus_minus: g.plus_minus.unwrap_or_default(),
        }
    }
}

impl LandingResponse {
    /// Date of the most recent game in the window, as reported ("2025-03-01").
    pub fn latest_game_date(&self) -> Option<&str> {
        self.last_5_games
            .iter()
            .flatten()
            .filter_map(|g| g.game_date.as_deref())
            .max()
    }

    pub fn recent_games(&self) -> Vec<GameStat> {
        self.last_5_games
            .iter()
            .flatten()
            .map(GameStat::from)
            .collect()
    }
}
