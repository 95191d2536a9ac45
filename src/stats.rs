use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

pub const MINUTES_PER_MATCH: f64 = 90.0;

/// Season counting stats for one player row. xG/xA are the provider's expected values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountingStats {
    pub goals: u32,
    pub assists: u32,
    pub xg: f64,
    pub xa: f64,
    pub shots: u32,
    pub key_passes: u32,
    pub minutes: u32,
    pub games: u32,
}

impl AddAssign<&CountingStats> for CountingStats {
    fn add_assign(&mut self, other: &CountingStats) {
        self.goals = self.goals.saturating_add(other.goals);
        self.assists = self.assists.saturating_add(other.assists);
        self.xg += other.xg;
        self.xa += other.xa;
        self.shots = self.shots.saturating_add(other.shots);
        self.key_passes = self.key_passes.saturating_add(other.key_passes);
        self.minutes = self.minutes.saturating_add(other.minutes);
        self.games = self.games.saturating_add(other.games);
    }
}

/// Per-90-minute rates, always derived from a [`CountingStats`] and never summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Per90 {
    pub goals: f64,
    pub assists: f64,
    pub xg: f64,
    pub xa: f64,
    pub shots: f64,
    pub key_passes: f64,
}

impl Per90 {
    pub fn from_totals(stats: &CountingStats) -> Self {
        let minutes = stats.minutes;
        Self {
            goals: per90(stats.goals as f64, minutes),
            assists: per90(stats.assists as f64, minutes),
            xg: per90(stats.xg, minutes),
            xa: per90(stats.xa, minutes),
            shots: per90(stats.shots as f64, minutes),
            key_passes: per90(stats.key_passes as f64, minutes),
        }
    }
}

/// `total / (minutes / 90)` rounded to two decimals; zero when no minutes were played.
pub fn per90(total: f64, minutes: u32) -> f64 {
    if minutes == 0 {
        return 0.0;
    }
    round2(total / (minutes as f64 / MINUTES_PER_MATCH))
}

/// Two decimals, ties to even (`0.625` -> `0.62`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// One row per (player, team, league, season) as ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonRecord {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub stats: CountingStats,
    pub per90: Per90,
    pub league: String,
    pub season: u16,
}

impl PlayerSeasonRecord {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<String>,
        stats: CountingStats,
        league: impl Into<String>,
        season: u16,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team: team.into(),
            position: position.into(),
            per90: Per90::from_totals(&stats),
            stats,
            league: league.into(),
            season,
        }
    }
}

/// One row per distinct player name after cross-league merging.
///
/// `team` holds every club seen (comma-joined, first-seen order) while `league`
/// holds the single primary league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedPlayerRecord {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub stats: CountingStats,
    pub per90: Per90,
    pub league: String,
    pub season: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
    VeryLow,
}

impl RiskTier {
    /// Bins are right-inclusive: (0,20], (20,28], (28,35], (35,50].
    pub fn from_games(games: u32) -> Option<Self> {
        match games {
            1..=20 => Some(Self::High),
            21..=28 => Some(Self::Medium),
            29..=35 => Some(Self::Low),
            36..=50 => Some(Self::VeryLow),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    pub player: MergedPlayerRecord,
    pub finishing_efficiency: f64,
    pub regularity_factor: f64,
    pub offensive_impact: f64,
    pub base_score: f64,
    pub weighted_score: f64,
    pub versatile: bool,
    pub risk_tier: Option<RiskTier>,
    pub league_factor: f64,
    pub cost_benefit: f64,
}
