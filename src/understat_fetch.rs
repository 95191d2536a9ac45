use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::stats::{CountingStats, PlayerSeasonRecord, round2};

const UNDERSTAT_LEAGUE_URL: &str = "https://understat.com/getLeagueData";

/// Players parsed from one league response. Records that failed to parse are
/// listed in `errors` and left out of `players`.
#[derive(Debug, Clone)]
pub struct LeagueFetch {
    pub league: String,
    pub season: u16,
    pub players: Vec<PlayerSeasonRecord>,
    pub errors: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record is not a json object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` has invalid value {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

pub fn league_url(league: &str, season: u16) -> String {
    format!(
        "{UNDERSTAT_LEAGUE_URL}/{}/{season}",
        provider_league_code(league)
    )
}

/// Understat's path segment for a league label (`epl` -> `EPL`, `La_Liga` -> `La_liga`).
pub fn provider_league_code(league: &str) -> String {
    match league.to_ascii_lowercase().as_str() {
        "epl" => "EPL".to_string(),
        "la_liga" => "La_liga".to_string(),
        "bundesliga" => "Bundesliga".to_string(),
        "serie_a" => "Serie_A".to_string(),
        "ligue_1" => "Ligue_1".to_string(),
        "rfpl" => "RFPL".to_string(),
        _ => league.to_string(),
    }
}

/// Fetch every player's season line for `league`. One blocking request.
pub fn fetch_league_players(league: &str, season: u16) -> Result<LeagueFetch> {
    let client = http_client()?;
    let url = league_url(league, season);
    let body = fetch_json_cached(client, &url, &[("X-Requested-With", "XMLHttpRequest")])
        .with_context(|| format!("fetch {league} {season}"))?;
    let fetched = parse_league_players_json(&body, league, season)
        .with_context(|| format!("parse {league} {season}"))?;
    info!(
        "[{league}] players found: {} (skipped {})",
        fetched.players.len(),
        fetched.errors.len()
    );
    Ok(fetched)
}

/// Parse a league payload. Accepts `{"players": [...]}`, the older
/// `{"response": {"players": [...]}}` envelope, or a bare array; `null` is empty.
pub fn parse_league_players_json(raw: &str, league: &str, season: u16) -> Result<LeagueFetch> {
    let value: Value = serde_json::from_str(raw).context("invalid league json")?;
    let mut out = LeagueFetch {
        league: league.to_string(),
        season,
        players: Vec::new(),
        errors: Vec::new(),
    };

    let items = match &value {
        Value::Null => return Ok(out),
        Value::Array(items) => items,
        Value::Object(_) => value
            .get("players")
            .or_else(|| value.get("response").and_then(|r| r.get("players")))
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("league json has no players array"))?,
        _ => return Err(anyhow!("unexpected league json shape")),
    };

    for item in items {
        match record_from_value(item, league, season) {
            Ok(record) => out.players.push(record),
            Err(err) => {
                let who = item
                    .get("player_name")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>");
                warn!("[{league}] skipping {who}: {err}");
                out.errors.push(format!("{who}: {err}"));
            }
        }
    }
    Ok(out)
}

fn record_from_value(
    value: &Value,
    league: &str,
    season: u16,
) -> Result<PlayerSeasonRecord, RecordError> {
    let obj = value.as_object().ok_or(RecordError::NotAnObject)?;
    let stats = CountingStats {
        goals: number_field(obj, "goals")?,
        assists: number_field(obj, "assists")?,
        xg: number_field(obj, "xG")?,
        xa: number_field(obj, "xA")?,
        shots: number_field(obj, "shots")?,
        key_passes: number_field(obj, "key_passes")?,
        minutes: number_field(obj, "time")?,
        games: number_field(obj, "games")?,
    };
    if !stats.xg.is_finite() || stats.xg < 0.0 {
        return Err(invalid("xG", &stats.xg.to_string()));
    }
    if !stats.xa.is_finite() || stats.xa < 0.0 {
        return Err(invalid("xA", &stats.xa.to_string()));
    }
    // Rates come from the provider's unrounded totals; only the stored totals are rounded.
    let mut record = PlayerSeasonRecord::new(
        number_field(obj, "id")?,
        text_field(obj, "player_name")?,
        text_field(obj, "team_title")?,
        text_field(obj, "position")?,
        stats,
        league,
        season,
    );
    record.stats.xg = round2(record.stats.xg);
    record.stats.xa = round2(record.stats.xa);
    Ok(record)
}

// Understat serialises every value as a string; plain json numbers are accepted too.
fn text_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RecordError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(invalid(field, &other.to_string())),
    }
}

fn number_field<T: FromStr>(obj: &Map<String, Value>, field: &'static str) -> Result<T, RecordError> {
    let raw = text_field(obj, field)?;
    raw.parse::<T>().map_err(|_| invalid(field, &raw))
}

fn invalid(field: &'static str, value: &str) -> RecordError {
    RecordError::InvalidValue {
        field,
        value: value.to_string(),
    }
}
