use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "2v2")]
    TwoVsTwo,
    #[serde(rename = "custom")]
    Custom,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::OneVsOne => "1v1",
            GameMode::TwoVsTwo => "2v2",
            GameMode::Custom => "custom",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "1v1" => Ok(GameMode::OneVsOne),
            "2v2" => Ok(GameMode::TwoVsTwo),
            "custom" => Ok(GameMode::Custom),
            other => Err(anyhow!("unknown game mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "name")]
    pub player_name: String,
    pub stars: u32,
    // Name at the time the match was played; subject lookups go through this one.
    #[serde(rename = "currentName")]
    pub display_name: String,
}

/// One finished match. `ranking` is ordered best finisher first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    #[serde(rename = "type")]
    pub game_mode: GameMode,
    pub id: String,
    #[serde(rename = "started")]
    pub started_at: u64,
    #[serde(rename = "turn")]
    pub turn_count: u32,
    pub ranking: Vec<Placement>,
}

impl Replay {
    /// Seat index and row of `username` in the final standings, if present.
    pub fn placement_of(&self, username: &str) -> Option<(usize, &Placement)> {
        self.ranking
            .iter()
            .enumerate()
            .find(|(_, p)| p.display_name == username)
    }

    pub fn has_player(&self, username: &str) -> bool {
        self.placement_of(username).is_some()
    }

    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.started_at).ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

pub fn parse_replays_json(raw: &str) -> Result<Vec<Replay>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let replays: Vec<Replay> = serde_json::from_str(trimmed).context("invalid replays json")?;
    if let Some(bad) = replays.iter().find(|r| r.ranking.is_empty()) {
        return Err(anyhow!("replay {} has an empty ranking", bad.id));
    }
    Ok(replays)
}

pub fn load_replays_file(path: &Path) -> Result<Vec<Replay>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read replays from {}", path.display()))?;
    parse_replays_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
