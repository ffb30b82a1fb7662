use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use generals_trends::chart::build_chart;
use generals_trends::filter::{Filter, apply_filter};
use generals_trends::layout::ChartLayout;
use generals_trends::replay::{GameMode, Placement, Replay};
use generals_trends::statistic::{Statistic, evaluate_series};

const SUBJECT: &str = "subject";

fn synthetic_history(count: usize) -> Vec<Replay> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|idx| {
            let game_mode = match rng.gen_range(0..4) {
                0 => GameMode::Classic,
                1 => GameMode::OneVsOne,
                2 => GameMode::TwoVsTwo,
                _ => GameMode::Custom,
            };
            let seats = match game_mode {
                GameMode::OneVsOne => 2,
                GameMode::TwoVsTwo => 4,
                GameMode::Classic | GameMode::Custom => rng.gen_range(2..=8),
            };
            let subject_seat = rng.gen_range(0..seats);
            let ranking = (0..seats)
                .map(|seat| {
                    let name = if seat == subject_seat {
                        SUBJECT.to_string()
                    } else {
                        format!("player{}", rng.gen_range(0..200))
                    };
                    Placement {
                        player_name: name.clone(),
                        stars: rng.gen_range(0..80),
                        display_name: name,
                    }
                })
                .collect();
            Replay {
                game_mode,
                id: format!("r{idx}"),
                started_at: 1_700_000_000_000 - idx as u64 * 600_000,
                turn_count: rng.gen_range(50..600),
                ranking,
            }
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let replays = synthetic_history(2000);
    let filter = Filter::Or(vec![
        Filter::ByGameMode(GameMode::Classic),
        Filter::And(vec![
            Filter::ByGameMode(GameMode::TwoVsTwo),
            Filter::AgainstOpponent("player7".to_string()),
        ]),
    ]);

    c.bench_function("apply_filter", |b| {
        b.iter(|| {
            let out = apply_filter(black_box(&filter), black_box(&replays));
            black_box(out.len());
        })
    });
}

fn bench_smoothed_series(c: &mut Criterion) {
    let replays = synthetic_history(2000);
    let stat = Statistic::average(25, Statistic::Percentile);

    c.bench_function("evaluate_series_average_25", |b| {
        b.iter(|| {
            let out = evaluate_series(black_box(&stat), black_box(&replays), SUBJECT);
            black_box(out.len());
        })
    });
}

fn bench_build_chart(c: &mut Criterion) {
    let replays = synthetic_history(2000);
    let xs = evaluate_series(&Statistic::Number, &replays, SUBJECT);
    let ys = evaluate_series(&Statistic::average(25, Statistic::Win), &replays, SUBJECT);
    let layout = ChartLayout::default();

    c.bench_function("build_chart", |b| {
        b.iter(|| {
            let chart = build_chart(black_box(&xs), black_box(&ys), &layout).unwrap();
            black_box(chart.segments.len());
        })
    });
}

criterion_group!(
    perf,
    bench_filter,
    bench_smoothed_series,
    bench_build_chart
);
criterion_main!(perf);
