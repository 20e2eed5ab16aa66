use anyhow::Context;
use log::{LevelFilter, warn};
use nhl_api::client::NhlApi;
use nhl_api::{PlayerRef, default_roster};
use std::str::FromStr;
use std::time::Duration;

pub const ROSTER_ENV: &str = "NHLTUI_ROSTER_JSON";
pub const API_BASE_ENV: &str = "NHLTUI_API_BASE";
pub const TIMEOUT_ENV: &str = "NHLTUI_TIMEOUT_SECS";
pub const LOG_ENV: &str = "NHLTUI_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub roster: Vec<PlayerRef>,
    pub api_base: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            roster: default_roster(),
            api_base: None,
            timeout: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an environment-like lookup. Malformed optional values
    /// are logged and ignored; an unreadable roster file is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup(ROSTER_ENV) {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("could not read roster file {path}"))?;
            settings.roster = parse_roster(&content)
                .with_context(|| format!("invalid roster json at {path}"))?;
        }

        settings.api_base = lookup(API_BASE_ENV);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => settings.timeout = Some(Duration::from_secs(secs)),
                _ => warn!("ignoring {TIMEOUT_ENV}={raw}: expected a positive number of seconds"),
            }
        }

        if let Some(raw) = lookup(LOG_ENV) {
            match LevelFilter::from_str(raw.trim()) {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => warn!("ignoring {LOG_ENV}={raw}: unknown log level"),
            }
        }

        Ok(settings)
    }

    pub fn api_client(&self) -> NhlApi {
        let mut client = NhlApi::new();
        if let Some(base) = &self.api_base {
            client = client.with_base_url(base.as_str());
        }
        if let Some(timeout) = self.timeout {
            client = client.with_timeout(timeout);
        }
        client
    }
}

fn parse_roster(content: &str) -> anyhow::Result<Vec<PlayerRef>> {
    let roster: Vec<PlayerRef> = serde_json::from_str(content)?;
    anyhow::ensure!(!roster.is_empty(), "roster is empty");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhl_api::Position;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppSettings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.roster, default_roster());
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.api_base, None);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn test_timeout_and_log_level() {
        let settings = settings_from(&[(TIMEOUT_ENV, "15"), (LOG_ENV, "debug")]).unwrap();
        assert_eq!(settings.timeout, Some(Duration::from_secs(15)));
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn test_api_client_uses_overrides() {
        let settings = settings_from(&[(API_BASE_ENV, "http://localhost:8080/")]).unwrap();
        assert_eq!(settings.api_client().base_url(), "http://localhost:8080");
        assert_eq!(AppSettings::default().api_client().base_url(), "https://api-web.nhle.com");
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let settings = settings_from(&[(TIMEOUT_ENV, "soon"), (LOG_ENV, "loud")]).unwrap();
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.log_level, None);

        let settings = settings_from(&[(TIMEOUT_ENV, "0")]).unwrap();
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let settings = settings_from(&[(API_BASE_ENV, "  "), (ROSTER_ENV, "")]).unwrap();
        assert_eq!(settings.api_base, None);
        assert_eq!(settings.roster, default_roster());
    }

    #[test]
    fn test_missing_roster_file_is_an_error() {
        let result = settings_from(&[(ROSTER_ENV, "/definitely/not/here/roster.json")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_roster() {
        let roster = parse_roster(
            r#"[
                {"id": "8471675", "name": "Sidney Crosby", "position": "forward"},
                {"id": "8480069", "name": "Cale Makar", "position": "defense"},
                {"id": "8478402", "name": "Connor McDavid"}
            ]"#,
        )
        .unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[1].position, Some(Position::Defense));
        assert_eq!(roster[2].position, None);
    }

    #[test]
    fn test_parse_roster_rejects_empty_and_unknown_positions() {
        assert!(parse_roster("[]").is_err());
        assert!(parse_roster(r#"[{"id": "1", "name": "G", "position": "goalie"}]"#).is_err());
    }
}
