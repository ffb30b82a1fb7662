use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use generals_trends::filter::{Filter, apply_filter};
use generals_trends::replay::{GameMode, load_replays_file};
use generals_trends::statistic::{Statistic, evaluate_series, parse_window};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .filter(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/replays.json"));
    let username = arg_value("--user")
        .or_else(|| std::env::var("GENERALS_USER").ok())
        .context("missing --user")?;
    let mode: GameMode = arg_value("--mode")
        .as_deref()
        .unwrap_or("classic")
        .parse()?;
    let window = parse_window(
        arg_value("--window")
            .or_else(|| std::env::var("TREND_WINDOW").ok())
            .as_deref(),
        25,
    )?;

    let replays = load_replays_file(&path)?;
    let replays = apply_filter(&Filter::ByGameMode(mode), &replays);
    if replays.is_empty() {
        return Err(anyhow!("no {mode} replays for {username}"));
    }

    let x_stat = Statistic::Number;
    let y_stat = Statistic::average(window, Statistic::Percentile);
    let xs = evaluate_series(&x_stat, &replays, &username);
    let ys = evaluate_series(&y_stat, &replays, &username);

    // Histories arrive newest first; print oldest first.
    println!("{},\"{}\",{}", x_stat, y_stat, mode);
    for i in (0..replays.len()).rev() {
        if xs[i].is_nan() || ys[i].is_nan() {
            continue;
        }
        let date = replays[i]
            .started_at_utc()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("{:.6},{:.6},{}", xs[i], ys[i], date);
    }

    Ok(())
}

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}
