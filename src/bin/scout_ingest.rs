use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use forward_scout::config::{PipelineConfig, parse_leagues};
use forward_scout::{pipeline, stats_store};

#[derive(Debug, clap::Parser)]
#[command(about = "Fetch a season from Understat into the player stats store")]
struct Args {
    /// season start year
    #[arg(short = 's', long)]
    season: Option<u16>,

    /// sqlite database path
    #[arg(long)]
    db: Option<PathBuf>,

    /// comma-separated league labels (e.g. "epl,La_Liga")
    #[arg(long)]
    leagues: Option<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forward_scout=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = PipelineConfig::from_env();
    if let Some(season) = args.season {
        config.season = season;
    }
    if let Some(raw) = args.leagues.as_deref() {
        config.leagues = parse_leagues(raw);
    }
    if config.leagues.is_empty() {
        return Err(anyhow!("no leagues resolved for ingest"));
    }

    let db_path = args
        .db
        .or(config.db_path)
        .context("unable to resolve sqlite path")?;
    let mut conn = stats_store::open_db(&db_path)?;
    let table = pipeline::load_or_ingest(&mut conn, config.season, &config.leagues, true)?;

    println!("Understat ingest complete");
    println!("DB: {}", db_path.display());
    println!("Season: {}", table.season);
    println!("Rows stored: {}", table.rows.len());
    for run in &table.runs {
        println!(
            "{}: {} players, {} skipped",
            run.league,
            run.records_stored,
            run.errors.len()
        );
        for err in run.errors.iter().take(8) {
            println!(" - {err}");
        }
    }
    println!(
        "Ingest runs recorded for season: {}",
        stats_store::ingest_run_count(&conn, table.season)?
    );

    Ok(())
}
