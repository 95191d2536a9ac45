use forward_scout::config::EligibilityConfig;
use forward_scout::eligibility::{filter_eligible, is_excluded_club, passes_sample_gate};
use forward_scout::stats::{CountingStats, MergedPlayerRecord, Per90};

fn merged(name: &str, team: &str, position: &str, games: u32, minutes: u32, goals: u32) -> MergedPlayerRecord {
    let stats = CountingStats {
        goals,
        assists: 3,
        xg: 9.0,
        xa: 2.0,
        shots: 50,
        key_passes: 20,
        minutes,
        games,
    };
    MergedPlayerRecord {
        id: 1,
        name: name.to_string(),
        team: team.to_string(),
        position: position.to_string(),
        per90: Per90::from_totals(&stats),
        stats,
        league: "Serie_A".to_string(),
        season: 2024,
    }
}

#[test]
fn fourteen_games_is_excluded() {
    let config = EligibilityConfig::defaults();
    let short = merged("Short Sample", "Como", "F S", 14, 1800, 10);
    assert!(!passes_sample_gate(&short, &config));
    assert!(filter_eligible(&[short], &config).is_empty());
}

#[test]
fn every_threshold_must_hold() {
    let config = EligibilityConfig::defaults();
    let ok = merged("Ok", "Como", "F S", 15, 900, 2);
    assert_eq!(ok.per90.goals, 0.2);
    assert!(passes_sample_gate(&ok, &config));

    assert!(!passes_sample_gate(&merged("Few Minutes", "Como", "F", 20, 899, 5), &config));
    assert!(!passes_sample_gate(&merged("Low Output", "Como", "F", 20, 1800, 3), &config));
}

#[test]
fn non_forwards_are_dropped() {
    let config = EligibilityConfig::defaults();
    let rows = vec![
        merged("Mid", "Como", "M S", 30, 2500, 10),
        merged("Def", "Como", "D", 30, 2500, 10),
        merged("Fwd", "Como", "F M S", 30, 2500, 10),
    ];
    let eligible = filter_eligible(&rows, &config);
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].name, "Fwd");
}

#[test]
fn big_club_players_are_excluded_after_gate() {
    let config = EligibilityConfig::defaults();
    let rows = vec![
        merged("Galactico", "Real Madrid", "F S", 30, 2500, 15),
        merged("Value Pick", "Getafe", "F S", 30, 2500, 15),
    ];
    let eligible = filter_eligible(&rows, &config);
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].name, "Value Pick");
}

#[test]
fn multi_club_string_is_not_matched() {
    let config = EligibilityConfig::defaults();
    assert!(is_excluded_club("Chelsea", &config));
    assert!(!is_excluded_club("Chelsea, Lyon", &config));
    assert!(!is_excluded_club("chelsea", &config));

    let moved = merged("Mid Season Move", "Chelsea, Lyon", "F S", 30, 2500, 15);
    assert_eq!(filter_eligible(&[moved], &config).len(), 1);
}

#[test]
fn input_order_is_preserved_and_empty_is_fine() {
    let config = EligibilityConfig::defaults();
    let rows = vec![
        merged("C", "Lens", "F", 30, 2500, 12),
        merged("A", "Lens", "F", 30, 2500, 12),
        merged("B", "Lens", "F", 30, 2500, 12),
    ];
    let names: Vec<String> = filter_eligible(&rows, &config)
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert!(filter_eligible(&[], &config).is_empty());
}
