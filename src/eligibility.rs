use tracing::debug;

use crate::config::EligibilityConfig;
use crate::stats::MergedPlayerRecord;

/// Forwards that clear the sample gate and do not already play for a big club.
/// Input order is preserved; rejected rows are dropped without error.
pub fn filter_eligible(
    rows: &[MergedPlayerRecord],
    config: &EligibilityConfig,
) -> Vec<MergedPlayerRecord> {
    let sampled: Vec<&MergedPlayerRecord> = rows
        .iter()
        .filter(|row| is_forward(row, config))
        .filter(|row| passes_sample_gate(row, config))
        .collect();
    let sampled_len = sampled.len();

    let out: Vec<MergedPlayerRecord> = sampled
        .into_iter()
        .filter(|row| !is_excluded_club(&row.team, config))
        .cloned()
        .collect();
    debug!(
        "eligibility: {} merged, {} pass sample gate, {} after club exclusion",
        rows.len(),
        sampled_len,
        out.len()
    );
    out
}

pub fn is_forward(row: &MergedPlayerRecord, config: &EligibilityConfig) -> bool {
    row.position.contains(config.forward_marker)
}

pub fn passes_sample_gate(row: &MergedPlayerRecord, config: &EligibilityConfig) -> bool {
    row.stats.games >= config.min_games
        && row.stats.minutes >= config.min_minutes
        && row.per90.goals >= config.min_goals_per90
}

/// Exact match against the roster. A merged "A, B" team string never matches.
pub fn is_excluded_club(team: &str, config: &EligibilityConfig) -> bool {
    config.excluded_clubs.iter().any(|club| club == team)
}
