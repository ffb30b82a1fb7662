use std::fs;
use std::path::PathBuf;

use generals_trends::filter::{Filter, apply_filter};
use generals_trends::replay::{GameMode, Replay, parse_replays_json};

fn fixture_replays() -> Vec<Replay> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("replays.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_replays_json(&raw).expect("fixture should parse")
}

fn ids(replays: &[Replay]) -> Vec<&str> {
    replays.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn game_mode_filter_keeps_original_order() {
    let replays = fixture_replays();
    let classic = apply_filter(&Filter::ByGameMode(GameMode::Classic), &replays);
    assert_eq!(ids(&classic), vec!["r6", "r3", "r1"]);
}

#[test]
fn opponent_filter_matches_display_names() {
    let replays = fixture_replays();
    let with_frank = apply_filter(&Filter::AgainstOpponent("frank".to_string()), &replays);
    assert_eq!(ids(&with_frank), vec!["r2"]);

    // "alice" played r1 under an older display name.
    let with_alice = apply_filter(&Filter::AgainstOpponent("alice".to_string()), &replays);
    assert_eq!(ids(&with_alice), vec!["r6", "r5", "r4", "r3", "r2"]);
    let with_old_name = apply_filter(&Filter::AgainstOpponent("alice_old".to_string()), &replays);
    assert_eq!(ids(&with_old_name), vec!["r1"]);
}

#[test]
fn empty_and_matches_everything_empty_or_matches_nothing() {
    let replays = fixture_replays();
    assert_eq!(apply_filter(&Filter::And(Vec::new()), &replays).len(), replays.len());
    assert!(apply_filter(&Filter::Or(Vec::new()), &replays).is_empty());
}

#[test]
fn combinators_compose() {
    let replays = fixture_replays();
    let classic_vs_erin = Filter::And(vec![
        Filter::ByGameMode(GameMode::Classic),
        Filter::AgainstOpponent("erin".to_string()),
        Filter::AgainstOpponent("alice".to_string()),
    ]);
    assert_eq!(ids(&apply_filter(&classic_vs_erin, &replays)), vec!["r6", "r3"]);

    let team_modes = Filter::Or(vec![
        Filter::ByGameMode(GameMode::OneVsOne),
        Filter::ByGameMode(GameMode::TwoVsTwo),
    ]);
    assert_eq!(ids(&apply_filter(&team_modes, &replays)), vec!["r5", "r4"]);
}

#[test]
fn filtered_output_is_a_subsequence() {
    let replays = fixture_replays();
    let filters = [
        Filter::ByGameMode(GameMode::Classic),
        Filter::ByGameMode(GameMode::TwoVsTwo),
        Filter::AgainstOpponent("bob".to_string()),
        Filter::Or(vec![
            Filter::ByGameMode(GameMode::Custom),
            Filter::AgainstOpponent("alice_old".to_string()),
        ]),
        Filter::And(Vec::new()),
        Filter::Or(Vec::new()),
    ];

    for filter in &filters {
        let out = apply_filter(filter, &replays);
        let mut cursor = replays.iter();
        for kept in &out {
            assert!(
                cursor.any(|r| r == kept),
                "{filter:?} produced an out-of-order or foreign replay {}",
                kept.id
            );
        }
    }
}
