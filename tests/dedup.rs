use forward_scout::dedup::{merge_by_player_name, primary_league};
use forward_scout::stats::{CountingStats, PlayerSeasonRecord};

fn row(
    id: u32,
    name: &str,
    team: &str,
    league: &str,
    games: u32,
    minutes: u32,
    goals: u32,
) -> PlayerSeasonRecord {
    PlayerSeasonRecord::new(
        id,
        name,
        team,
        "F S",
        CountingStats {
            goals,
            assists: 2,
            xg: goals as f64 * 0.8,
            xa: 1.5,
            shots: goals * 4,
            key_passes: 10,
            minutes,
            games,
        },
        league,
        2024,
    )
}

#[test]
fn transfer_rows_merge_into_one_player() {
    let rows = vec![
        row(11, "A. Striker", "Lille", "League1", 20, 1500, 10),
        row(12, "A. Striker", "Genoa", "League2", 10, 600, 3),
    ];
    let merged = merge_by_player_name(&rows);
    assert_eq!(merged.len(), 1);

    let player = &merged[0];
    assert_eq!(player.stats.games, 30);
    assert_eq!(player.stats.minutes, 2100);
    assert_eq!(player.stats.goals, 13);
    assert_eq!(player.league, "League1");
    assert_eq!(player.team, "Lille, Genoa");
    assert_eq!(player.id, 11);
    assert_eq!(player.per90.goals, 0.56);
    assert_eq!(player.per90.assists, 0.17);
}

#[test]
fn minutes_and_games_are_conserved() {
    let rows = vec![
        row(1, "P. One", "A", "epl", 12, 1000, 4),
        row(2, "P. Two", "B", "La_Liga", 30, 2500, 12),
        row(1, "P. One", "C", "Serie_A", 9, 700, 2),
        row(1, "P. One", "D", "Ligue_1", 3, 200, 0),
        row(3, "P. Three", "E", "Bundesliga", 0, 0, 0),
    ];
    let merged = merge_by_player_name(&rows);
    assert_eq!(merged.len(), 3);
    for player in &merged {
        let originals: Vec<&PlayerSeasonRecord> =
            rows.iter().filter(|r| r.name == player.name).collect();
        let minutes: u32 = originals.iter().map(|r| r.stats.minutes).sum();
        let games: u32 = originals.iter().map(|r| r.stats.games).sum();
        assert_eq!(player.stats.minutes, minutes, "{}", player.name);
        assert_eq!(player.stats.games, games, "{}", player.name);
    }
}

#[test]
fn output_follows_first_appearance_order() {
    let rows = vec![
        row(5, "Zed", "A", "epl", 10, 900, 3),
        row(6, "Abe", "B", "epl", 10, 900, 3),
        row(5, "Zed", "C", "La_Liga", 10, 900, 3),
        row(7, "Moe", "D", "epl", 10, 900, 3),
    ];
    let names: Vec<String> = merge_by_player_name(&rows)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Zed", "Abe", "Moe"]);
}

#[test]
fn zero_minutes_after_merge_keeps_rates_at_zero() {
    let rows = vec![
        row(9, "Bench Warmer", "A", "epl", 1, 0, 0),
        row(9, "Bench Warmer", "B", "Serie_A", 2, 0, 0),
    ];
    let merged = merge_by_player_name(&rows);
    let rates = merged[0].per90;
    for value in [
        rates.goals,
        rates.assists,
        rates.xg,
        rates.xa,
        rates.shots,
        rates.key_passes,
    ] {
        assert_eq!(value, 0.0);
    }
}

#[test]
fn single_league_two_clubs_keeps_league() {
    let rows = vec![
        row(4, "Loan Move", "Everton", "epl", 8, 400, 1),
        row(4, "Loan Move", "Fulham", "epl", 15, 1200, 6),
    ];
    let merged = merge_by_player_name(&rows);
    assert_eq!(merged[0].league, "epl");
    assert_eq!(merged[0].team, "Everton, Fulham");
}

#[test]
fn primary_league_ties_go_to_first_row() {
    let a = row(1, "Tie", "A", "Serie_A", 10, 900, 2);
    let b = row(1, "Tie", "B", "Ligue_1", 10, 900, 2);
    let c = row(1, "Tie", "C", "epl", 3, 300, 0);
    assert_eq!(primary_league(&[&a, &b, &c]), Some("Serie_A"));
    assert_eq!(primary_league(&[&c, &a, &b]), Some("Serie_A"));
    assert_eq!(primary_league(&[]), None);
}

#[test]
fn names_are_matched_exactly() {
    let rows = vec![
        row(1, "Vinicius Junior", "A", "La_Liga", 10, 900, 5),
        row(2, "Vinícius Júnior", "B", "epl", 10, 900, 5),
    ];
    assert_eq!(merge_by_player_name(&rows).len(), 2);
    assert!(merge_by_player_name(&[]).is_empty());
}
