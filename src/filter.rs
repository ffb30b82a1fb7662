use crate::replay::{GameMode, Replay};

/// Predicate used to narrow a match history before any statistic is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    ByGameMode(GameMode),
    AgainstOpponent(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn matches(&self, replay: &Replay) -> bool {
        match self {
            Filter::ByGameMode(mode) => replay.game_mode == *mode,
            Filter::AgainstOpponent(name) => replay.has_player(name),
            Filter::And(filters) => filters.iter().all(|f| f.matches(replay)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(replay)),
        }
    }
}

/// Keeps the replays `filter` accepts, in their original order.
pub fn apply_filter(filter: &Filter, replays: &[Replay]) -> Vec<Replay> {
    let out: Vec<Replay> = replays
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    tracing::debug!(kept = out.len(), total = replays.len(), "applied replay filter");
    out
}
