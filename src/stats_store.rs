use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::http_cache::app_cache_dir;
use crate::stats::{CountingStats, Per90, PlayerSeasonRecord};

/// One league ingest as recorded in the `ingest_runs` ledger.
#[derive(Debug, Clone)]
pub struct IngestRun {
    pub season: u16,
    pub league: String,
    pub started_at: String,
    pub finished_at: String,
    pub records_stored: usize,
    pub errors: Vec<String>,
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("player_stats.sqlite"))
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS player_season_stats (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            season INTEGER NOT NULL,
            player_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            team TEXT NOT NULL,
            position TEXT NOT NULL,
            goals INTEGER NOT NULL,
            assists INTEGER NOT NULL,
            xg REAL NOT NULL,
            xa REAL NOT NULL,
            shots INTEGER NOT NULL,
            key_passes INTEGER NOT NULL,
            minutes INTEGER NOT NULL,
            games INTEGER NOT NULL,
            goals_90 REAL NOT NULL,
            assists_90 REAL NOT NULL,
            xg_90 REAL NOT NULL,
            xa_90 REAL NOT NULL,
            shots_90 REAL NOT NULL,
            key_passes_90 REAL NOT NULL,
            league TEXT NOT NULL,
            stored_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_player_season_stats_season ON player_season_stats(season);

        CREATE TABLE IF NOT EXISTS ingest_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            season INTEGER NOT NULL,
            league TEXT NOT NULL,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            records_stored INTEGER NOT NULL,
            errors_json TEXT NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn season_row_count(conn: &Connection, season: u16) -> Result<usize> {
    let count = conn
        .query_row(
            "SELECT COUNT(*) FROM player_season_stats WHERE season = ?1",
            params![season],
            |row| row.get::<_, i64>(0),
        )
        .context("count season rows")?;
    Ok(usize::try_from(count).unwrap_or_default())
}

pub fn has_season(conn: &Connection, season: u16) -> Result<bool> {
    Ok(season_row_count(conn, season)? > 0)
}

/// Rows for `season` in the order they were stored.
pub fn load_season(conn: &Connection, season: u16) -> Result<Vec<PlayerSeasonRecord>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT
                player_id, name, team, position,
                goals, assists, xg, xa, shots, key_passes, minutes, games,
                goals_90, assists_90, xg_90, xa_90, shots_90, key_passes_90,
                league, season
            FROM player_season_stats
            WHERE season = ?1
            ORDER BY row_id ASC
            "#,
        )
        .context("prepare load season query")?;

    let rows = stmt
        .query_map(params![season], record_from_row)
        .context("query load season")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode player row")?);
    }
    Ok(out)
}

/// Replace every stored row of `season` with `rows`, in one transaction.
pub fn replace_season(
    conn: &mut Connection,
    season: u16,
    rows: &[PlayerSeasonRecord],
) -> Result<usize> {
    let stored_at = Utc::now().to_rfc3339();
    let tx = conn.transaction().context("begin store transaction")?;
    tx.execute(
        "DELETE FROM player_season_stats WHERE season = ?1",
        params![season],
    )
    .context("clear season rows")?;
    {
        let mut insert = tx
            .prepare(
                r#"
                INSERT INTO player_season_stats (
                    season, player_id, name, team, position,
                    goals, assists, xg, xa, shots, key_passes, minutes, games,
                    goals_90, assists_90, xg_90, xa_90, shots_90, key_passes_90,
                    league, stored_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5,
                    ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15, ?16, ?17, ?18, ?19,
                    ?20, ?21
                )
                "#,
            )
            .context("prepare insert player row")?;
        for r in rows {
            insert
                .execute(params![
                    season,
                    r.id,
                    r.name,
                    r.team,
                    r.position,
                    r.stats.goals,
                    r.stats.assists,
                    r.stats.xg,
                    r.stats.xa,
                    r.stats.shots,
                    r.stats.key_passes,
                    r.stats.minutes,
                    r.stats.games,
                    r.per90.goals,
                    r.per90.assists,
                    r.per90.xg,
                    r.per90.xa,
                    r.per90.shots,
                    r.per90.key_passes,
                    r.league,
                    stored_at,
                ])
                .with_context(|| format!("insert player row {}", r.name))?;
        }
    }
    tx.commit().context("commit store transaction")?;
    Ok(rows.len())
}

pub fn record_ingest_run(conn: &Connection, run: &IngestRun) -> Result<()> {
    let errors_json = serde_json::to_string(&run.errors).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO ingest_runs(season, league, started_at, finished_at, records_stored, errors_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            run.season,
            run.league,
            run.started_at,
            run.finished_at,
            run.records_stored as i64,
            errors_json,
        ],
    )
    .context("insert ingest run")?;
    Ok(())
}

pub fn ingest_run_count(conn: &Connection, season: u16) -> Result<usize> {
    let count = conn
        .query_row(
            "SELECT COUNT(*) FROM ingest_runs WHERE season = ?1",
            params![season],
            |row| row.get::<_, i64>(0),
        )
        .context("count ingest runs")?;
    Ok(usize::try_from(count).unwrap_or_default())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PlayerSeasonRecord> {
    Ok(PlayerSeasonRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        team: row.get(2)?,
        position: row.get(3)?,
        stats: CountingStats {
            goals: row.get(4)?,
            assists: row.get(5)?,
            xg: row.get(6)?,
            xa: row.get(7)?,
            shots: row.get(8)?,
            key_passes: row.get(9)?,
            minutes: row.get(10)?,
            games: row.get(11)?,
        },
        per90: Per90 {
            goals: row.get(12)?,
            assists: row.get(13)?,
            xg: row.get(14)?,
            xa: row.get(15)?,
            shots: row.get(16)?,
            key_passes: row.get(17)?,
        },
        league: row.get(18)?,
        season: row.get(19)?,
    })
}
