use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use generals_trends::chart::{Chart, Segment, build_chart};
use generals_trends::filter::{Filter, apply_filter};
use generals_trends::layout::ChartLayout;
use generals_trends::replay::{GameMode, load_replays_file};
use generals_trends::statistic::{Statistic, evaluate_series, parse_window};

const DEFAULT_WINDOW: usize = 25;

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run() {
        Ok(svg) => {
            print!("{svg}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String> {
    let path = std::env::args()
        .nth(1)
        .filter(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .context("usage: generals_trends <replays.json> --user NAME [--mode M] [--against NAME] [--window N]")?;
    let username = arg_value("--user")
        .or_else(|| std::env::var("GENERALS_USER").ok())
        .filter(|u| !u.trim().is_empty())
        .context("missing --user")?;
    let mode: GameMode = arg_value("--mode")
        .as_deref()
        .unwrap_or("classic")
        .parse()?;
    let window = parse_window(
        arg_value("--window")
            .or_else(|| std::env::var("TREND_WINDOW").ok())
            .as_deref(),
        DEFAULT_WINDOW,
    )?;

    let mut filter = Filter::ByGameMode(mode);
    if let Some(opponent) = arg_value("--against") {
        filter = Filter::And(vec![filter, Filter::AgainstOpponent(opponent)]);
    }

    let replays = load_replays_file(&path)?;
    let replays = apply_filter(&filter, &replays);
    if replays.is_empty() {
        return Err(anyhow!("no data"));
    }

    let x_stat = Statistic::Number;
    let y_stat = Statistic::average(window, Statistic::Percentile);
    let xs = evaluate_series(&x_stat, &replays, &username);
    let ys = evaluate_series(&y_stat, &replays, &username);

    let layout = ChartLayout::from_env();
    let chart = build_chart(&xs, &ys, &layout)?;
    tracing::info!(
        user = %username,
        mode = %mode,
        segments = chart.segments.len(),
        "chart built"
    );
    Ok(render_svg(&chart, &x_stat.describe(), &y_stat.describe()))
}

fn render_svg(chart: &Chart, x_label: &str, y_label: &str) -> String {
    let (w, h) = (chart.canvas_width, chart.canvas_height);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg viewBox="0 0 {w} {h}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = write!(out, "<title>{} vs {}</title>", escape(y_label), escape(x_label));
    for seg in chart.segments.iter().chain(&chart.axis_lines) {
        push_line(&mut out, seg);
    }
    for tick in chart.x_ticks.iter().chain(&chart.y_ticks) {
        let _ = write!(
            out,
            r#"<text x="{:.3}" y="{:.3}" text-anchor="middle">{}</text>"#,
            tick.anchor.x,
            tick.anchor.y,
            escape(&tick.label)
        );
    }
    out.push_str("</svg>\n");
    out
}

fn push_line(out: &mut String, seg: &Segment) {
    let _ = write!(
        out,
        r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke-width="{}" stroke="{}" />"#,
        seg.from.x,
        seg.from.y,
        seg.to.x,
        seg.to.y,
        seg.stroke.width,
        escape(&seg.stroke.color)
    );
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}
