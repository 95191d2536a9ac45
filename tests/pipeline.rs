use std::cell::Cell;

use anyhow::anyhow;

use forward_scout::config::{EligibilityConfig, ScoringConfig};
use forward_scout::pipeline::{load_or_ingest_with, run_pipeline};
use forward_scout::stats::{CountingStats, PlayerSeasonRecord};
use forward_scout::stats_store;
use forward_scout::understat_fetch::LeagueFetch;

fn row(
    name: &str,
    team: &str,
    league: &str,
    games: u32,
    minutes: u32,
    goals: u32,
    xg: f64,
) -> PlayerSeasonRecord {
    PlayerSeasonRecord::new(
        7,
        name,
        team,
        "F S",
        CountingStats {
            goals,
            assists: 4,
            xg,
            xa: 2.5,
            shots: 55,
            key_passes: 25,
            minutes,
            games,
        },
        league,
        2024,
    )
}

fn season_rows() -> Vec<PlayerSeasonRecord> {
    vec![
        row("A. Striker", "Lille", "Ligue_1", 20, 1500, 10, 8.0),
        row("Haaland Type", "Manchester City", "epl", 31, 2683, 22, 21.8),
        row("Journeyman", "Getafe", "La_Liga", 33, 2800, 14, 11.0),
        row("A. Striker", "Genoa", "Serie_A", 10, 600, 3, 2.5),
        row("Fringe", "Mainz", "Bundesliga", 14, 1000, 6, 4.0),
        row("Finisher", "Freiburg", "Bundesliga", 28, 2300, 15, 9.0),
    ]
}

fn fake_fetch(league: &str, season: u16) -> anyhow::Result<LeagueFetch> {
    Ok(LeagueFetch {
        league: league.to_string(),
        season,
        players: season_rows()
            .into_iter()
            .filter(|r| r.league == league)
            .collect(),
        errors: if league == "epl" {
            vec!["Broken Record: field `games` has invalid value \"x\"".to_string()]
        } else {
            Vec::new()
        },
    })
}

fn leagues() -> Vec<String> {
    ["Ligue_1", "epl", "La_Liga", "Bundesliga", "Serie_A"]
        .iter()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn store_round_trip_preserves_order_and_values() {
    let mut conn = stats_store::open_in_memory().unwrap();
    let rows = season_rows();
    assert!(!stats_store::has_season(&conn, 2024).unwrap());
    assert_eq!(stats_store::replace_season(&mut conn, 2024, &rows).unwrap(), rows.len());
    assert!(stats_store::has_season(&conn, 2024).unwrap());
    assert!(!stats_store::has_season(&conn, 2023).unwrap());
    assert_eq!(stats_store::load_season(&conn, 2024).unwrap(), rows);

    // Replacing a season does not duplicate rows.
    stats_store::replace_season(&mut conn, 2024, &rows[..2]).unwrap();
    assert_eq!(stats_store::season_row_count(&conn, 2024).unwrap(), 2);
}

#[test]
fn cached_season_skips_ingest() {
    let mut conn = stats_store::open_in_memory().unwrap();
    let calls = Cell::new(0usize);
    let counting_fetch = |league: &str, season: u16| {
        calls.set(calls.get() + 1);
        fake_fetch(league, season)
    };

    let first = load_or_ingest_with(&mut conn, 2024, &leagues(), false, counting_fetch).unwrap();
    assert!(!first.from_cache);
    assert_eq!(calls.get(), 5);
    assert_eq!(first.rows.len(), 6);
    // League order, not source order.
    assert_eq!(first.rows[0].league, "Ligue_1");
    assert_eq!(first.runs.len(), 5);
    assert_eq!(first.runs[1].errors.len(), 1);
    assert_eq!(stats_store::ingest_run_count(&conn, 2024).unwrap(), 5);

    let second = load_or_ingest_with(&mut conn, 2024, &leagues(), false, counting_fetch).unwrap();
    assert!(second.from_cache);
    assert_eq!(calls.get(), 5);
    assert_eq!(second.rows, first.rows);

    let refreshed = load_or_ingest_with(&mut conn, 2024, &leagues(), true, counting_fetch).unwrap();
    assert!(!refreshed.from_cache);
    assert_eq!(calls.get(), 10);
    assert_eq!(stats_store::season_row_count(&conn, 2024).unwrap(), 6);
}

#[test]
fn league_failure_aborts_ingest() {
    let mut conn = stats_store::open_in_memory().unwrap();
    let failing = |league: &str, season: u16| {
        if league == "La_Liga" {
            Err(anyhow!("http 503"))
        } else {
            fake_fetch(league, season)
        }
    };
    let err = load_or_ingest_with(&mut conn, 2024, &leagues(), false, failing).unwrap_err();
    assert!(format!("{err:#}").contains("La_Liga"));
    assert!(!stats_store::has_season(&conn, 2024).unwrap());
}

#[test]
fn end_to_end_shortlist() {
    let output = run_pipeline(
        2024,
        &season_rows(),
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        10,
    );
    assert_eq!(output.ingested_rows, 6);
    assert_eq!(output.merged_players, 5);

    // Big club and 14-game player are out.
    let eligible: Vec<&str> = output
        .eligible
        .iter()
        .map(|p| p.player.name.as_str())
        .collect();
    assert_eq!(eligible, vec!["A. Striker", "Journeyman", "Finisher"]);

    let striker = &output.eligible[0];
    assert_eq!(striker.player.stats.minutes, 2100);
    assert_eq!(striker.player.league, "Ligue_1");
    assert_eq!(striker.league_factor, 0.8);

    assert_eq!(output.shortlist.len(), 3);
    assert!(
        output
            .shortlist
            .windows(2)
            .all(|w| w[0].weighted_score >= w[1].weighted_score)
    );
}

#[test]
fn empty_season_gives_empty_tables() {
    let output = run_pipeline(
        2024,
        &[],
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        10,
    );
    assert_eq!(output.merged_players, 0);
    assert!(output.eligible.is_empty());
    assert!(output.shortlist.is_empty());
}
