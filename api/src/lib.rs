pub mod client;
pub mod nhle;
pub mod scoring;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Domain types, independent of the NHL wire format
// ---------------------------------------------------------------------------

/// Skater position as far as scoring is concerned. Goalies are not tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Forward,
    Defense,
}

impl Position {
    pub fn label(&self) -> &'static str {
        match self {
            Position::Forward => "Forwards",
            Position::Defense => "Defense",
        }
    }

    /// Points awarded per goal. Defensemen get a premium for scoring.
    pub fn goal_weight(&self) -> f64 {
        match self {
            Position::Forward => 2.0,
            Position::Defense => 3.0,
        }
    }
}

/// A player on the roster we want numbers for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerRef {
    /// NHL player id, e.g. "8471675".
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
}

impl PlayerRef {
    pub fn new(id: &str, name: &str, position: Option<Position>) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            position,
        }
    }

    /// Position used for weighting. An unspecified position scores as a forward.
    pub fn scoring_position(&self) -> Position {
        self.position.unwrap_or_default()
    }
}

/// One played game from a player's last-5-games window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStat {
    pub goals: u32,
    pub assists: u32,
    pub plus_minus: i32,
}

/// Aggregated last-5-games line for one player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerResult {
    pub name: String,
    pub position: Position,
    pub goals: u32,
    pub assists: u32,
    pub plus_minus: i32,
    pub fantasy_points: f64,
    pub games_played: usize,
}

/// The roster shown when no override file is configured.
pub fn default_roster() -> Vec<PlayerRef> {
    const FORWARDS: [(&str, &str); 13] = [
        ("8477404", "Jake Guentzel"),
        ("8478550", "Artemi Panarin"),
        ("8480027", "Jason Robertson"),
        ("8478427", "Sebastian Aho"),
        ("8471675", "Sidney Crosby"),
        ("8478449", "Roope Hintz"),
        ("8482720", "Matthew Knies"),
        ("8477949", "Alex Tuch"),
        ("8476459", "Mika Zibanejad"),
        ("8477476", "Artturi Lehkonen"),
        ("8484227", "Will Smith"),
        ("8475168", "Matt Duchene"),
        ("8476455", "Gabriel Landeskog"),
    ];
    const DEFENSE: [(&str, &str); 6] = [
        ("8480069", "Cale Makar"),
        ("8480800", "Quinn Hughes"),
        ("8479323", "Adam Fox"),
        ("8474600", "Roman Josi"),
        ("8475167", "Victor Hedman"),
        ("8480839", "Rasmus Dahlin"),
    ];

    FORWARDS
        .iter()
        .map(|(id, name)| PlayerRef::new(id, name, Some(Position::Forward)))
        .chain(
            DEFENSE
                .iter()
                .map(|(id, name)| PlayerRef::new(id, name, Some(Position::Defense))),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_roster_ids_are_unique() {
        let roster = default_roster();
        let ids: HashSet<&str> = roster.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn test_default_roster_covers_both_positions() {
        let roster = default_roster();
        assert!(roster.iter().any(|p| p.position == Some(Position::Forward)));
        assert!(roster.iter().any(|p| p.position == Some(Position::Defense)));
    }

    #[test]
    fn test_unspecified_position_scores_as_forward() {
        let player = PlayerRef::new("1", "Nobody", None);
        assert_eq!(player.scoring_position(), Position::Forward);
    }
}
