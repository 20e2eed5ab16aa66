use crate::nhle::LandingResponse;
use crate::{GameStat, PlayerRef, PlayerResult, scoring};
use futures_util::future::try_join_all;
use log::{debug, warn};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const NHLE_WEB_V1: &str = "https://api-web.nhle.com";

/// NHL stats client backed by the public api-web.nhle.com endpoints.
#[derive(Debug, Clone)]
pub struct NhlApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for NhlApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nhltui/0.1 (terminal fantasy table)")
                .build()
                .unwrap_or_default(),
            base_url: NHLE_WEB_V1.to_owned(),
            timeout: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
        }
    }
}

impl NhlApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Per-request timeout. Requests wait indefinitely when unset.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the last-5-games window for one player.
    /// A landing page without `last5Games` yields an empty window.
    pub async fn fetch_last_five(&self, player_id: &str) -> ApiResult<Vec<GameStat>> {
        let url = format!("{}/v1/player/{player_id}/landing", self.base_url);
        let raw: LandingResponse = self.get(&url).await?;
        let games = raw.recent_games();
        debug!(
            "player {player_id}: {} recent games, latest {}",
            games.len(),
            raw.latest_game_date().unwrap_or("n/a")
        );
        Ok(games)
    }

    /// Fetch every player concurrently and aggregate once all have resolved.
    ///
    /// All-or-nothing: the first failing request aborts the batch and the
    /// remaining in-flight requests are dropped. Results follow roster order.
    pub async fn fetch_roster(&self, roster: &[PlayerRef]) -> ApiResult<Vec<PlayerResult>> {
        let windows = try_join_all(roster.iter().map(|p| self.fetch_last_five(&p.id))).await?;
        Ok(scoring::aggregate_all(roster, &windows))
    }

    /// The body is decoded whatever the status: an error reply that still
    /// carries JSON counts as a player without recent games.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{url} answered {status}, reading body anyway");
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use mockito::{Server, ServerGuard};

    async fn landing(server: &mut ServerGuard, player_id: &str, status: usize, body: &str) -> mockito::Mock {
        server
            .mock("GET", format!("/v1/player/{player_id}/landing").as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    const TWO_GAMES: &str = r#"{"last5Games": [
        {"goals": 2, "assists": 1, "plusMinus": 1},
        {"goals": 0, "assists": 0, "plusMinus": -1}
    ]}"#;

    #[tokio::test]
    async fn test_fetch_last_five_reads_window() {
        let mut server = Server::new_async().await;
        let mock = landing(
            &mut server,
            "8471675",
            200,
            r#"{"playerId": 8471675, "last5Games": [
                {"gameDate": "2025-03-01", "goals": 2, "assists": 1, "plusMinus": 1},
                {"gameDate": "2025-02-27", "goals": 0, "assists": 0, "plusMinus": -1}
            ]}"#,
        )
        .await;

        let api = NhlApi::new().with_base_url(server.url());
        let games = api.fetch_last_five("8471675").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            games,
            vec![
                GameStat { goals: 2, assists: 1, plus_minus: 1 },
                GameStat { goals: 0, assists: 0, plus_minus: -1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_last_five_without_window_is_empty() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 200, r#"{"playerId": 1}"#).await;

        let api = NhlApi::new().with_base_url(server.url());
        let games = api.fetch_last_five("1").await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_roster_aggregates_in_roster_order() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 200, TWO_GAMES).await;
        let _m2 = landing(&mut server, "2", 200, TWO_GAMES).await;
        let _m3 = landing(&mut server, "3", 200, r#"{}"#).await;

        let roster = vec![
            PlayerRef::new("1", "Forward One", Some(Position::Forward)),
            PlayerRef::new("2", "Defense Two", Some(Position::Defense)),
            PlayerRef::new("3", "Idle Three", Some(Position::Forward)),
        ];
        let api = NhlApi::new().with_base_url(server.url());
        let results = api.fetch_roster(&roster).await.unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Forward One", "Defense Two", "Idle Three"]);
        assert_eq!(results[0].fantasy_points, 5.0);
        assert_eq!(results[1].fantasy_points, 7.0);
        assert_eq!(results[2].fantasy_points, 0.0);
        assert_eq!(results[2].games_played, 0);
    }

    #[tokio::test]
    async fn test_fetch_roster_scores_not_found_json_as_zero() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 200, TWO_GAMES).await;
        let _m2 = landing(&mut server, "2", 404, r#"{"message": "not found"}"#).await;

        let roster = vec![
            PlayerRef::new("1", "Healthy", None),
            PlayerRef::new("2", "Missing", None),
        ];
        let api = NhlApi::new().with_base_url(server.url());
        let results = api.fetch_roster(&roster).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].fantasy_points, 5.0);
        assert_eq!(results[1].name, "Missing");
        assert_eq!(results[1].fantasy_points, 0.0);
        assert_eq!(results[1].games_played, 0);
    }

    #[tokio::test]
    async fn test_fetch_roster_scores_server_error_json_as_zero() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 500, r#"{"error": "boom"}"#).await;

        let roster = vec![PlayerRef::new("1", "Broken", Some(Position::Defense))];
        let api = NhlApi::new().with_base_url(server.url());
        let results = api.fetch_roster(&roster).await.unwrap();

        assert_eq!(results[0].goals, 0);
        assert_eq!(results[0].fantasy_points, 0.0);
        assert_eq!(results[0].games_played, 0);
    }

    #[tokio::test]
    async fn test_fetch_roster_fails_on_non_json_error_page() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 200, TWO_GAMES).await;
        let _m2 = landing(&mut server, "2", 500, "<html>Internal Server Error</html>").await;

        let roster = vec![
            PlayerRef::new("1", "Healthy", None),
            PlayerRef::new("2", "Broken", None),
        ];
        let api = NhlApi::new().with_base_url(server.url());
        let err = api.fetch_roster(&roster).await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(_, ref url) if url.ends_with("/v1/player/2/landing")));
    }

    #[tokio::test]
    async fn test_fetch_roster_fails_on_malformed_body() {
        let mut server = Server::new_async().await;
        let _m1 = landing(&mut server, "1", 200, r#"<html>not json</html>"#).await;

        let roster = vec![PlayerRef::new("1", "Garbled", None)];
        let api = NhlApi::new().with_base_url(server.url());
        let err = api.fetch_roster(&roster).await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)));
        assert!(err.to_string().starts_with("Parse error for "));
    }

    #[tokio::test]
    async fn test_fetch_roster_fails_when_host_unreachable() {
        let api = NhlApi::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5));
        let roster = vec![PlayerRef::new("1", "Nobody", None)];
        let err = api.fetch_roster(&roster).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(..)));
    }

    #[tokio::test]
    async fn test_fetch_roster_with_empty_roster_makes_no_requests() {
        let api = NhlApi::new().with_base_url("http://127.0.0.1:9");
        let results = api.fetch_roster(&[]).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_base_url_drops_trailing_slash() {
        let api = NhlApi::new().with_base_url("http://localhost:1234/");
        assert_eq!(api.base_url(), "http://localhost:1234");
    }
}
