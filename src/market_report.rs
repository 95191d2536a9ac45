//! Summaries of the shortlist against the eligible pool ("the market").
//!
//! Everything here is derived from the two pipeline tables; nothing is fetched.

use std::collections::HashSet;

use crate::stats::ScoredPlayer;

/// League display order used by the market breakdown, cheapest league first.
pub const MARKET_LEAGUE_ORDER: &[(&str, &str)] = &[
    ("Ligue_1", "Ligue 1"),
    ("Serie_A", "Serie A"),
    ("Bundesliga", "Bundesliga"),
    ("La_Liga", "La Liga"),
    ("epl", "Premier League"),
];

// Caps used to normalise profile values onto [0, 1].
const PROFILE_CAPS: ProfileValues = ProfileValues {
    goals_per90: 1.2,
    assists_per90: 0.8,
    finishing_efficiency: 2.0,
    regularity: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductivityTier {
    Elite,
    Strong,
    Solid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerComparison {
    pub rank: usize,
    pub name: String,
    pub team: String,
    pub league: String,
    pub goals_per90: f64,
    pub pct_vs_market: f64,
    pub tier: ProductivityTier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueMarketRow {
    pub league: String,
    pub label: String,
    pub shortlisted: usize,
    pub pool: usize,
    pub selection_rate_pct: f64,
    pub mean_cost_benefit: f64,
    pub mean_weighted_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutiveKpis {
    pub analysed: usize,
    pub shortlisted: usize,
    pub mean_weighted_score: f64,
    pub best_cost_benefit: f64,
    pub leagues_covered: usize,
    pub market_goals_per90: f64,
    pub shortlist_goals_per90: f64,
    pub improvement_pct: f64,
    pub selection_rate_pct: f64,
}

impl ExecutiveKpis {
    /// Label and display value for each KPI, in report order.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Forwards analysed", self.analysed.to_string()),
            ("Shortlisted", self.shortlisted.to_string()),
            ("Selection rate", format!("{:.1}%", self.selection_rate_pct)),
            ("Mean score", format!("{:.2}", self.mean_weighted_score)),
            ("Best C/B", format!("{:.2}", self.best_cost_benefit)),
            ("Leagues covered", self.leagues_covered.to_string()),
            ("Market G/90", format!("{:.2}", self.market_goals_per90)),
            ("Shortlist G/90", format!("{:.2}", self.shortlist_goals_per90)),
            ("Improvement", format!("{:+.0}%", self.improvement_pct)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// High score and high cost-benefit.
    Priority,
    /// Lower score, high cost-benefit.
    Opportunity,
    /// High score, lower cost-benefit.
    Premium,
    Monitor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionPoint {
    pub name: String,
    pub league: String,
    pub weighted_score: f64,
    pub cost_benefit: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileValues {
    pub goals_per90: f64,
    pub assists_per90: f64,
    pub finishing_efficiency: f64,
    pub regularity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub rank: usize,
    pub name: String,
    pub league: String,
    pub games: u32,
    pub weighted_score: f64,
    pub raw: ProfileValues,
    pub normalised: ProfileValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketReport {
    pub kpis: ExecutiveKpis,
    pub comparisons: Vec<PlayerComparison>,
    pub leagues: Vec<LeagueMarketRow>,
    pub decision_matrix: Vec<DecisionPoint>,
    pub top_profiles: Vec<PlayerProfile>,
}

pub fn build_market_report(shortlist: &[ScoredPlayer], pool: &[ScoredPlayer]) -> MarketReport {
    MarketReport {
        kpis: executive_kpis(shortlist, pool),
        comparisons: player_comparisons(shortlist, pool),
        leagues: league_market_summary(shortlist, pool),
        decision_matrix: decision_matrix(shortlist),
        top_profiles: top_profiles(shortlist, 5),
    }
}

/// Mean goals/90 across the eligible pool; 0 for an empty pool.
pub fn market_average_goals_per90(pool: &[ScoredPlayer]) -> f64 {
    mean(pool.iter().map(|p| p.player.per90.goals))
}

pub fn player_comparisons(shortlist: &[ScoredPlayer], pool: &[ScoredPlayer]) -> Vec<PlayerComparison> {
    let market = market_average_goals_per90(pool);
    shortlist
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let goals = p.player.per90.goals;
            let tier = if goals > market * 1.5 {
                ProductivityTier::Elite
            } else if goals > market * 1.2 {
                ProductivityTier::Strong
            } else {
                ProductivityTier::Solid
            };
            PlayerComparison {
                rank: idx + 1,
                name: p.player.name.clone(),
                team: p.player.team.clone(),
                league: p.player.league.clone(),
                goals_per90: goals,
                pct_vs_market: pct_change(goals, market),
                tier,
            }
        })
        .collect()
}

/// Per-league breakdown of the shortlist, best mean cost-benefit first.
/// Leagues without a shortlisted player are omitted.
pub fn league_market_summary(
    shortlist: &[ScoredPlayer],
    pool: &[ScoredPlayer],
) -> Vec<LeagueMarketRow> {
    let mut rows: Vec<LeagueMarketRow> = MARKET_LEAGUE_ORDER
        .iter()
        .filter_map(|(league, label)| {
            let picked: Vec<&ScoredPlayer> = shortlist
                .iter()
                .filter(|p| p.player.league == *league)
                .collect();
            if picked.is_empty() {
                return None;
            }
            let pool_len = pool.iter().filter(|p| p.player.league == *league).count();
            let selection_rate_pct = if pool_len > 0 {
                picked.len() as f64 / pool_len as f64 * 100.0
            } else {
                0.0
            };
            Some(LeagueMarketRow {
                league: league.to_string(),
                label: label.to_string(),
                shortlisted: picked.len(),
                pool: pool_len,
                selection_rate_pct,
                mean_cost_benefit: mean(picked.iter().map(|p| p.cost_benefit)),
                mean_weighted_score: mean(picked.iter().map(|p| p.weighted_score)),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.mean_cost_benefit.total_cmp(&a.mean_cost_benefit));
    rows
}

pub fn executive_kpis(shortlist: &[ScoredPlayer], pool: &[ScoredPlayer]) -> ExecutiveKpis {
    let market = market_average_goals_per90(pool);
    let shortlist_goals = mean(shortlist.iter().map(|p| p.player.per90.goals));
    let leagues: HashSet<&str> = shortlist.iter().map(|p| p.player.league.as_str()).collect();
    ExecutiveKpis {
        analysed: pool.len(),
        shortlisted: shortlist.len(),
        mean_weighted_score: mean(shortlist.iter().map(|p| p.weighted_score)),
        best_cost_benefit: shortlist
            .iter()
            .map(|p| p.cost_benefit)
            .fold(0.0, f64::max),
        leagues_covered: leagues.len(),
        market_goals_per90: market,
        shortlist_goals_per90: shortlist_goals,
        improvement_pct: pct_change(shortlist_goals, market),
        selection_rate_pct: if pool.is_empty() {
            0.0
        } else {
            shortlist.len() as f64 / pool.len() as f64 * 100.0
        },
    }
}

/// Place each shortlisted player relative to the shortlist's median score and
/// median cost-benefit.
pub fn decision_matrix(shortlist: &[ScoredPlayer]) -> Vec<DecisionPoint> {
    let score_median = median(shortlist.iter().map(|p| p.weighted_score).collect());
    let cb_median = median(shortlist.iter().map(|p| p.cost_benefit).collect());
    shortlist
        .iter()
        .map(|p| {
            let high_score = p.weighted_score >= score_median;
            let high_cb = p.cost_benefit >= cb_median;
            let quadrant = match (high_score, high_cb) {
                (true, true) => Quadrant::Priority,
                (false, true) => Quadrant::Opportunity,
                (true, false) => Quadrant::Premium,
                (false, false) => Quadrant::Monitor,
            };
            DecisionPoint {
                name: p.player.name.clone(),
                league: p.player.league.clone(),
                weighted_score: p.weighted_score,
                cost_benefit: p.cost_benefit,
                quadrant,
            }
        })
        .collect()
}

pub fn top_profiles(shortlist: &[ScoredPlayer], n: usize) -> Vec<PlayerProfile> {
    shortlist
        .iter()
        .take(n)
        .enumerate()
        .map(|(idx, p)| {
            let raw = ProfileValues {
                goals_per90: p.player.per90.goals,
                assists_per90: p.player.per90.assists,
                finishing_efficiency: p.finishing_efficiency,
                regularity: p.regularity_factor,
            };
            PlayerProfile {
                rank: idx + 1,
                name: p.player.name.clone(),
                league: p.player.league.clone(),
                games: p.player.stats.games,
                weighted_score: p.weighted_score,
                raw,
                normalised: normalise_profile(&raw),
            }
        })
        .collect()
}

fn normalise_profile(raw: &ProfileValues) -> ProfileValues {
    let cap = |v: f64, max: f64| (v / max).min(1.0);
    ProfileValues {
        goals_per90: cap(raw.goals_per90, PROFILE_CAPS.goals_per90),
        assists_per90: cap(raw.assists_per90, PROFILE_CAPS.assists_per90),
        finishing_efficiency: cap(raw.finishing_efficiency, PROFILE_CAPS.finishing_efficiency),
        regularity: cap(raw.regularity, PROFILE_CAPS.regularity),
    }
}

fn pct_change(value: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return 0.0;
    }
    (value / baseline - 1.0) * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
