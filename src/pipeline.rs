use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

use crate::config::{EligibilityConfig, ScoringConfig};
use crate::dedup::merge_by_player_name;
use crate::eligibility::filter_eligible;
use crate::scoring::score_players;
use crate::shortlist::select_top;
use crate::stats::{PlayerSeasonRecord, ScoredPlayer};
use crate::stats_store::{self, IngestRun};
use crate::understat_fetch::{self, LeagueFetch};

/// Ingested rows for one season and where they came from.
#[derive(Debug, Clone)]
pub struct SeasonTable {
    pub season: u16,
    pub rows: Vec<PlayerSeasonRecord>,
    pub from_cache: bool,
    pub runs: Vec<IngestRun>,
}

/// The two tables handed to reporting.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub season: u16,
    pub ingested_rows: usize,
    pub merged_players: usize,
    pub eligible: Vec<ScoredPlayer>,
    pub shortlist: Vec<ScoredPlayer>,
}

/// Stored rows for `season` when present, otherwise a fresh fetch from Understat.
pub fn load_or_ingest(
    conn: &mut Connection,
    season: u16,
    leagues: &[String],
    refresh: bool,
) -> Result<SeasonTable> {
    load_or_ingest_with(
        conn,
        season,
        leagues,
        refresh,
        understat_fetch::fetch_league_players,
    )
}

/// As [`load_or_ingest`] with the league fetcher supplied by the caller.
pub fn load_or_ingest_with(
    conn: &mut Connection,
    season: u16,
    leagues: &[String],
    refresh: bool,
    fetch: impl FnMut(&str, u16) -> Result<LeagueFetch>,
) -> Result<SeasonTable> {
    if !refresh && stats_store::has_season(conn, season)? {
        let rows = stats_store::load_season(conn, season)?;
        info!("season {season}: {} cached rows, skipping ingest", rows.len());
        return Ok(SeasonTable {
            season,
            rows,
            from_cache: true,
            runs: Vec::new(),
        });
    }

    let (rows, runs) = ingest_season(leagues, season, fetch)?;
    let stored = stats_store::replace_season(conn, season, &rows)?;
    for run in &runs {
        stats_store::record_ingest_run(conn, run)?;
    }
    info!("season {season}: stored {stored} rows from {} leagues", runs.len());
    Ok(SeasonTable {
        season,
        rows,
        from_cache: false,
        runs,
    })
}

/// Fetch each league in turn and concatenate the rows in league order.
pub fn ingest_season(
    leagues: &[String],
    season: u16,
    mut fetch: impl FnMut(&str, u16) -> Result<LeagueFetch>,
) -> Result<(Vec<PlayerSeasonRecord>, Vec<IngestRun>)> {
    let mut rows = Vec::new();
    let mut runs = Vec::new();
    for league in leagues {
        info!("collecting {league} {season}");
        let started_at = Utc::now().to_rfc3339();
        let fetched = fetch(league, season).with_context(|| format!("ingest {league}"))?;
        runs.push(IngestRun {
            season,
            league: league.clone(),
            started_at,
            finished_at: Utc::now().to_rfc3339(),
            records_stored: fetched.players.len(),
            errors: fetched.errors,
        });
        rows.extend(fetched.players);
    }
    Ok((rows, runs))
}

/// Deduplicate, filter, score and rank one season's rows.
pub fn run_pipeline(
    season: u16,
    rows: &[PlayerSeasonRecord],
    eligibility: &EligibilityConfig,
    scoring: &ScoringConfig,
    shortlist_size: usize,
) -> PipelineOutput {
    let merged = merge_by_player_name(rows);
    let eligible_rows = filter_eligible(&merged, eligibility);
    let eligible = score_players(&eligible_rows, scoring);
    let shortlist = select_top(&eligible, shortlist_size);
    info!(
        "pipeline: {} rows -> {} players -> {} eligible -> {} shortlisted",
        rows.len(),
        merged.len(),
        eligible.len(),
        shortlist.len()
    );
    PipelineOutput {
        season,
        ingested_rows: rows.len(),
        merged_players: merged.len(),
        eligible,
        shortlist,
    }
}
