use std::fmt;

use anyhow::{Context, Result};

use crate::replay::{GameMode, Replay};

/// Per-match metric for one subject. Undefined results are `f64::NAN` and
/// must be skipped by anything aggregating them.
#[derive(Debug, Clone, PartialEq)]
pub enum Statistic {
    /// 1 if the subject (or their team in 2v2) won, else 0.
    Win,
    /// Subject's stars for the match.
    Stars,
    /// Finishing position scaled to [0, 1], 1 being first.
    Percentile,
    /// Countdown position in the history: `len - index`.
    Number,
    /// Raw start timestamp of the match.
    Date,
    /// Parabolic-weighted mean of `of` over `window` matches either side.
    Average { window: usize, of: Box<Statistic> },
}

impl Statistic {
    pub fn average(window: usize, of: Statistic) -> Self {
        Statistic::Average {
            window,
            of: Box::new(of),
        }
    }

    pub fn evaluate(&self, replays: &[Replay], index: usize, username: &str) -> f64 {
        match self {
            Statistic::Number => replays.len() as f64 - index as f64,
            Statistic::Average { window, of } => {
                windowed_average(*window, of, replays, index, username)
            }
            Statistic::Win => {
                let Some(replay) = replays.get(index) else {
                    return f64::NAN;
                };
                indicator(won(replay, username))
            }
            Statistic::Stars => {
                let Some(replay) = replays.get(index) else {
                    return f64::NAN;
                };
                replay
                    .placement_of(username)
                    .map(|(_, p)| p.stars as f64)
                    .unwrap_or(f64::NAN)
            }
            Statistic::Percentile => {
                let Some(replay) = replays.get(index) else {
                    return f64::NAN;
                };
                percentile(replay, username)
            }
            Statistic::Date => replays
                .get(index)
                .map(|r| r.started_at as f64)
                .unwrap_or(f64::NAN),
        }
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Win => f.write_str("Win"),
            Statistic::Stars => f.write_str("Stars"),
            Statistic::Percentile => f.write_str("Percentile"),
            Statistic::Number => f.write_str("Number"),
            Statistic::Date => f.write_str("Date"),
            Statistic::Average { window, of } => write!(f, "Average[{window},{of}]"),
        }
    }
}

/// Evaluates `stat` at every index; the output is index-aligned with `replays`.
pub fn evaluate_series(stat: &Statistic, replays: &[Replay], username: &str) -> Vec<f64> {
    let out: Vec<f64> = (0..replays.len())
        .map(|i| stat.evaluate(replays, i, username))
        .collect();
    tracing::debug!(
        stat = %stat,
        len = out.len(),
        undefined = out.len() - count_defined(&out),
        "evaluated series"
    );
    out
}

pub fn count_defined(series: &[f64]) -> usize {
    series.iter().filter(|v| !v.is_nan()).count()
}

/// Smoothing window from a `--window` / `TREND_WINDOW` value; `default` when unset.
pub fn parse_window(raw: Option<&str>, default: usize) -> Result<usize> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("invalid --window {raw:?}")),
        None => Ok(default),
    }
}

fn won(replay: &Replay, username: &str) -> bool {
    match replay.game_mode {
        GameMode::Classic | GameMode::Custom | GameMode::OneVsOne => {
            replay.ranking.first().is_some_and(|p| p.display_name == username)
        }
        GameMode::TwoVsTwo => team_won(replay, username),
    }
}

fn percentile(replay: &Replay, username: &str) -> f64 {
    match replay.game_mode {
        GameMode::Classic | GameMode::Custom => {
            let Some((seat, _)) = replay.placement_of(username) else {
                return 0.0;
            };
            let last = replay.ranking.len() - 1;
            if last == 0 {
                return 1.0;
            }
            (last - seat) as f64 / last as f64
        }
        GameMode::OneVsOne => {
            indicator(replay.ranking.first().is_some_and(|p| p.display_name == username))
        }
        GameMode::TwoVsTwo => indicator(team_won(replay, username)),
    }
}

// Teams are not recorded. When seats 0..=2 share the top star count the
// first two seats are taken as the winning team; otherwise anyone holding
// the winner's star count is on the winning team.
fn team_won(replay: &Replay, username: &str) -> bool {
    let Some(winner) = replay.ranking.first() else {
        return false;
    };
    let winning_stars = winner.stars;
    let seat_has_winning_stars =
        |seat: usize| replay.ranking.get(seat).is_some_and(|p| p.stars == winning_stars);

    if seat_has_winning_stars(1) && seat_has_winning_stars(2) {
        replay
            .ranking
            .iter()
            .take(2)
            .any(|p| p.display_name == username)
    } else {
        replay
            .ranking
            .iter()
            .any(|p| p.display_name == username && p.stars == winning_stars)
    }
}

// Window is [index - n, index + n) clipped to the history; the far edge
// carries zero weight anyway.
fn windowed_average(
    n: usize,
    of: &Statistic,
    replays: &[Replay],
    index: usize,
    username: &str,
) -> f64 {
    let lo = index.saturating_sub(n);
    let hi = index.saturating_add(n).min(replays.len());
    let mut total_value = 0.0_f64;
    let mut total_weight = 0.0_f64;

    for idx in lo..hi {
        let value = of.evaluate(replays, idx, username);
        if value.is_nan() {
            continue;
        }
        let ratio = (idx as f64 - index as f64) / n as f64;
        let weight = 1.0 - ratio * ratio;
        total_value += value * weight;
        total_weight += weight;
    }

    total_value / total_weight
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}
