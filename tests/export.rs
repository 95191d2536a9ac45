use forward_scout::config::{EligibilityConfig, ScoringConfig};
use forward_scout::market_report::build_market_report;
use forward_scout::pipeline::run_pipeline;
use forward_scout::report_export::{
    DECISION_COLUMNS, PROFILE_COLUMNS, SCORED_COLUMNS, decision_row, export_workbook, profile_row,
    write_shortlist_csv,
};
use forward_scout::stats::{CountingStats, PlayerSeasonRecord};

fn rows() -> Vec<PlayerSeasonRecord> {
    [
        ("Lead", "Lens", "Ligue_1", 2400u32, 16u32, 11.3),
        ("Second", "Girona", "La_Liga", 2000, 9, 7.0),
        ("Third", "Bologna", "Serie_A", 1800, 7, 7.7),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, (name, team, league, minutes, goals, xg))| {
        PlayerSeasonRecord::new(
            idx as u32 + 1,
            name,
            team,
            "F S",
            CountingStats {
                goals,
                assists: 3,
                xg,
                xa: 2.0,
                shots: 45,
                key_passes: 18,
                minutes,
                games: 26,
            },
            league,
            2024,
        )
    })
    .collect()
}

#[test]
fn shortlist_csv_has_fixed_header_and_two_decimals() {
    let output = run_pipeline(
        2024,
        &rows(),
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        10,
    );
    assert_eq!(output.shortlist.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forward_shortlist.csv");
    write_shortlist_csv(&path, &output.shortlist).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(|h| h.to_string())
        .collect();
    assert_eq!(header, SCORED_COLUMNS);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][1], output.shortlist[0].player.name.as_str());

    let weighted_idx = SCORED_COLUMNS
        .iter()
        .position(|c| *c == "Weighted Score")
        .unwrap();
    for record in &records {
        let cell = &record[weighted_idx];
        let decimals = cell.split('.').nth(1).unwrap_or_default();
        assert_eq!(decimals.len(), 2, "{cell}");
    }
}

#[test]
fn workbook_is_written() {
    let output = run_pipeline(
        2024,
        &rows(),
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        2,
    );
    let report = build_market_report(&output.shortlist, &output.eligible);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forward_report.xlsx");
    let summary = export_workbook(&path, &output, &report).unwrap();
    assert_eq!(summary.shortlist_rows, 2);
    assert_eq!(summary.pool_rows, 3);
    assert_eq!(summary.league_rows, report.leagues.len());
    assert_eq!(summary.comparison_rows, 2);
    assert_eq!(summary.decision_rows, 2);
    assert_eq!(summary.profile_rows, 2);
    assert_eq!(summary.kpi_rows, report.kpis.summary_lines().len());
    assert!(path.exists());
}

#[test]
fn decision_and_profile_rows_match_their_headers() {
    let output = run_pipeline(
        2024,
        &rows(),
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        3,
    );
    let report = build_market_report(&output.shortlist, &output.eligible);
    assert_eq!(report.decision_matrix.len(), 3);
    assert_eq!(report.top_profiles.len(), 3);

    for point in &report.decision_matrix {
        let row = decision_row(point);
        assert_eq!(row.len(), DECISION_COLUMNS.len());
        assert_eq!(row[0], point.name);
        assert_eq!(row[4], format!("{:?}", point.quadrant));
    }

    let first = profile_row(&report.top_profiles[0]);
    assert_eq!(first.len(), PROFILE_COLUMNS.len());
    assert_eq!(first[0], "1");
    assert_eq!(first[1], output.shortlist[0].player.name);
    for cell in &first[9..] {
        let value: f64 = cell.parse().unwrap();
        assert!((0.0..=1.0).contains(&value), "{cell}");
    }
}

#[test]
fn empty_shortlist_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    write_shortlist_csv(&path, &[]).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Id,Name,Team,Position,"));
}
