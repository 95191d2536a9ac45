use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::stats_store;

pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_SHORTLIST_SIZE: usize = 10;
pub const DEFAULT_LEAGUES: &[&str] = &["Ligue_1", "epl", "La_Liga", "Bundesliga", "Serie_A"];

pub const BIG_CLUBS: &[&str] = &[
    "Real Madrid",
    "Bayern Munich",
    "Manchester City",
    "Paris Saint Germain",
    "Barcelona",
    "Liverpool",
    "Atletico Madrid",
    "Manchester United",
    "Chelsea",
    "Borussia Dortmund",
    "Juventus",
    "Arsenal",
    "Roma",
    "Inter",
    "Sevilla",
    "Benfica",
    "Bayer Leverkusen",
    "Tottenham",
    "Porto",
    "Napoli",
];

// Estimated relative transfer cost; the most expensive league is the reference.
const LEAGUE_VALUES: &[(&str, f64)] = &[
    ("epl", 1.00),
    ("La_Liga", 0.95),
    ("Bundesliga", 0.90),
    ("Serie_A", 0.85),
    ("Ligue_1", 0.80),
];
const DEFAULT_LEAGUE_VALUE: f64 = 0.85;

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueValueTable {
    pub entries: Vec<(String, f64)>,
    pub default_factor: f64,
}

impl LeagueValueTable {
    pub fn defaults() -> Self {
        Self {
            entries: LEAGUE_VALUES
                .iter()
                .map(|(league, value)| (league.to_string(), *value))
                .collect(),
            default_factor: DEFAULT_LEAGUE_VALUE,
        }
    }

    pub fn factor_for(&self, league: &str) -> f64 {
        self.entries
            .iter()
            .find(|(name, _)| name == league)
            .map(|(_, value)| *value)
            .unwrap_or(self.default_factor)
    }
}

/// Minimum-sample gate and club roster applied before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityConfig {
    pub forward_marker: char,
    pub min_games: u32,
    pub min_minutes: u32,
    pub min_goals_per90: f64,
    pub excluded_clubs: Vec<String>,
}

impl EligibilityConfig {
    pub fn defaults() -> Self {
        Self {
            forward_marker: 'F',
            min_games: 15,
            min_minutes: 900,
            min_goals_per90: 0.2,
            excluded_clubs: BIG_CLUBS.iter().map(|club| club.to_string()).collect(),
        }
    }
}

/// Hand-tuned recruiting weights. These are policy constants, not fitted values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub goals_weight: f64,
    pub impact_weight: f64,
    pub efficiency_weight: f64,
    pub key_passes_weight: f64,
    pub assist_impact_weight: f64,
    pub xg_floor: f64,
    pub regularity_floor: f64,
    pub regularity_ceiling: f64,
    pub versatile_goals_per90: f64,
    pub versatile_assists_per90: f64,
    pub league_values: LeagueValueTable,
}

impl ScoringConfig {
    pub fn defaults() -> Self {
        Self {
            goals_weight: 0.45,
            impact_weight: 0.25,
            efficiency_weight: 0.20,
            key_passes_weight: 0.10,
            assist_impact_weight: 0.8,
            xg_floor: 0.1,
            regularity_floor: 0.7,
            regularity_ceiling: 1.0,
            versatile_goals_per90: 0.3,
            versatile_assists_per90: 0.1,
            league_values: LeagueValueTable::defaults(),
        }
    }
}

/// Run-level settings resolved from the environment (`.env` files included).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub season: u16,
    pub leagues: Vec<String>,
    pub shortlist_size: usize,
    pub db_path: Option<PathBuf>,
    pub out_dir: PathBuf,
}

impl PipelineConfig {
    pub fn defaults() -> Self {
        Self {
            season: DEFAULT_SEASON,
            leagues: DEFAULT_LEAGUES.iter().map(|l| l.to_string()).collect(),
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            db_path: stats_store::default_db_path(),
            out_dir: PathBuf::from("."),
        }
    }

    pub fn from_env() -> Self {
        let mut out = Self::defaults();
        out.season = env_parse("SCOUT_SEASON").unwrap_or(out.season);
        out.shortlist_size = env_parse::<usize>("SCOUT_SHORTLIST_SIZE")
            .unwrap_or(out.shortlist_size)
            .max(1);
        if let Some(leagues) = env_nonempty("SCOUT_LEAGUES").map(|raw| parse_leagues(&raw)) {
            if !leagues.is_empty() {
                out.leagues = leagues;
            }
        }
        if let Some(path) = env_nonempty("SCOUT_DB_PATH") {
            out.db_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = env_nonempty("SCOUT_OUT_DIR") {
            out.out_dir = PathBuf::from(dir);
        }
        out
    }
}

pub fn parse_leagues(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([',', ';', ' ']) {
        let league = part.trim();
        if league.is_empty() || out.iter().any(|l| l == league) {
            continue;
        }
        out.push(league.to_string());
    }
    out
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_nonempty(key)?;
    match raw.trim().parse::<T>() {
        Ok(val) => Some(val),
        Err(_) => {
            warn!("ignoring unparseable {key}={raw:?}");
            None
        }
    }
}
