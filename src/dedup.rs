use std::collections::HashMap;

use tracing::debug;

use crate::stats::{CountingStats, MergedPlayerRecord, Per90, PlayerSeasonRecord};

/// Collapse per-league rows into one row per player name.
///
/// Rows are grouped by exact display name. Output follows the order in which each
/// name first appears in `rows`; "first" fields (id, position, season) come from
/// that first row. Players moving mid-season keep a single primary league.
pub fn merge_by_player_name(rows: &[PlayerSeasonRecord]) -> Vec<MergedPlayerRecord> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&PlayerSeasonRecord>> = HashMap::new();
    for row in rows {
        groups
            .entry(row.name.as_str())
            .or_insert_with(|| {
                order.push(row.name.as_str());
                Vec::new()
            })
            .push(row);
    }

    let merged: Vec<MergedPlayerRecord> = order
        .iter()
        .filter_map(|name| groups.get(name))
        .filter_map(|group| merge_group(group))
        .collect();
    debug!(
        "merged {} rows into {} players",
        rows.len(),
        merged.len()
    );
    merged
}

/// League of the player's row with the most minutes; the first such row wins a tie.
/// A player seen in a single league keeps it without comparison.
pub fn primary_league<'a>(rows: &[&'a PlayerSeasonRecord]) -> Option<&'a str> {
    let (&first, rest) = rows.split_first()?;
    if rest.iter().all(|r| r.league == first.league) {
        return Some(first.league.as_str());
    }
    let mut best = first;
    for row in rest {
        if row.stats.minutes > best.stats.minutes {
            best = *row;
        }
    }
    Some(best.league.as_str())
}

fn merge_group(group: &[&PlayerSeasonRecord]) -> Option<MergedPlayerRecord> {
    let first = group.first()?;
    let league = primary_league(group)?;

    let mut stats = CountingStats::default();
    for row in group {
        stats += &row.stats;
    }

    Some(MergedPlayerRecord {
        id: first.id,
        name: first.name.clone(),
        team: join_distinct(group.iter().map(|r| r.team.as_str())),
        position: first.position.clone(),
        per90: Per90::from_totals(&stats),
        stats,
        league: league.to_string(),
        season: first.season,
    })
}

fn join_distinct<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.join(", ")
}

#[cfg(test)]
mod tests {
    use super::join_distinct;

    #[test]
    fn join_distinct_keeps_first_seen_order() {
        let teams = ["Lyon", "Everton", "Lyon", "Aston Villa"];
        assert_eq!(
            join_distinct(teams.into_iter()),
            "Lyon, Everton, Aston Villa"
        );
        assert_eq!(join_distinct(std::iter::empty()), "");
    }
}
