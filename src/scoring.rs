use crate::config::ScoringConfig;
use crate::stats::{MergedPlayerRecord, RiskTier, ScoredPlayer};

/// Score every eligible player. Regularity is relative to the most-used player
/// in `rows`, so the result depends on the whole pool.
pub fn score_players(rows: &[MergedPlayerRecord], config: &ScoringConfig) -> Vec<ScoredPlayer> {
    let max_minutes = rows.iter().map(|r| r.stats.minutes).max().unwrap_or(0);
    rows.iter()
        .map(|row| score_player(row, max_minutes, config))
        .collect()
}

pub fn score_player(
    row: &MergedPlayerRecord,
    max_minutes: u32,
    config: &ScoringConfig,
) -> ScoredPlayer {
    let per90 = &row.per90;
    let finishing_efficiency = finishing_efficiency(row.stats.goals, row.stats.xg, config.xg_floor);
    let regularity_factor = regularity_factor(row.stats.minutes, max_minutes, config);
    let offensive_impact = per90.goals + per90.assists * config.assist_impact_weight;

    let base_score = per90.goals * config.goals_weight
        + offensive_impact * config.impact_weight
        + finishing_efficiency * config.efficiency_weight
        + per90.key_passes * config.key_passes_weight;
    let weighted_score = base_score * regularity_factor;

    let league_factor = config.league_values.factor_for(&row.league);

    ScoredPlayer {
        player: row.clone(),
        finishing_efficiency,
        regularity_factor,
        offensive_impact,
        base_score,
        weighted_score,
        versatile: per90.goals > config.versatile_goals_per90
            && per90.assists > config.versatile_assists_per90,
        risk_tier: RiskTier::from_games(row.stats.games),
        league_factor,
        cost_benefit: cost_benefit(weighted_score, league_factor),
    }
}

/// Goals per expected goal. xG below `xg_floor` (zero included) is raised to the
/// floor, so two goals from no xG gives 20.0 rather than infinity.
pub fn finishing_efficiency(goals: u32, xg: f64, xg_floor: f64) -> f64 {
    goals as f64 / xg.max(xg_floor)
}

/// `sqrt(minutes / max_minutes)` clamped to the configured band.
pub fn regularity_factor(minutes: u32, max_minutes: u32, config: &ScoringConfig) -> f64 {
    let ratio = if max_minutes == 0 {
        0.0
    } else {
        minutes as f64 / max_minutes as f64
    };
    ratio
        .sqrt()
        .clamp(config.regularity_floor, config.regularity_ceiling)
}

pub fn cost_benefit(weighted_score: f64, league_factor: f64) -> f64 {
    weighted_score / league_factor
}
