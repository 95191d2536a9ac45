use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stanza::renderer::Renderer;
use stanza::renderer::console::Console;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forward_scout::config::{EligibilityConfig, PipelineConfig, ScoringConfig};
use forward_scout::market_report::build_market_report;
use forward_scout::shortlist::league_counts;
use forward_scout::{pipeline, print, report_export, stats_store};

const SHORTLIST_CSV: &str = "forward_shortlist.csv";
const REPORT_XLSX: &str = "forward_report.xlsx";

#[derive(Debug, clap::Parser, Clone)]
#[command(about = "Rank value-for-money forwards across the top five leagues")]
struct Args {
    /// season start year (defaults to SCOUT_SEASON or 2024)
    #[arg(short = 's', long)]
    season: Option<u16>,

    /// sqlite database holding ingested player stats
    #[arg(long)]
    db: Option<PathBuf>,

    /// directory for the CSV and XLSX exports
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,

    /// shortlist size
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// re-fetch from Understat even when the season is already stored
    #[arg(long)]
    refresh: bool,
}

impl Args {
    fn apply(self, config: &mut PipelineConfig) {
        if let Some(season) = self.season {
            config.season = season;
        }
        if let Some(db) = self.db {
            config.db_path = Some(db);
        }
        if let Some(dir) = self.out_dir {
            config.out_dir = dir;
        }
        if let Some(top) = self.top {
            config.shortlist_size = top.max(1);
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forward_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    debug!("args: {args:?}");
    let refresh = args.refresh;
    let mut config = PipelineConfig::from_env();
    args.apply(&mut config);

    let db_path = config
        .db_path
        .clone()
        .context("unable to resolve sqlite path")?;
    let mut conn = stats_store::open_db(&db_path)?;
    let table = pipeline::load_or_ingest(&mut conn, config.season, &config.leagues, refresh)?;
    for run in &table.runs {
        if !run.errors.is_empty() {
            warn!("{}: {} records skipped", run.league, run.errors.len());
        }
    }

    let output = pipeline::run_pipeline(
        config.season,
        &table.rows,
        &EligibilityConfig::defaults(),
        &ScoringConfig::defaults(),
        config.shortlist_size,
    );
    let report = build_market_report(&output.shortlist, &output.eligible);

    println!(
        "Season {} | rows {} | players {} | eligible forwards {}",
        output.season,
        output.ingested_rows,
        output.merged_players,
        output.eligible.len()
    );
    println!("{}", Console::default().render(&print::tabulate_shortlist(&output.shortlist)));
    println!("{}", Console::default().render(&print::tabulate_leagues(&report.leagues)));
    println!("{}", Console::default().render(&print::tabulate_kpis(&report.kpis)));
    println!(
        "Decision matrix:\n{}",
        Console::default().render(&print::tabulate_decision_matrix(&report.decision_matrix))
    );
    println!(
        "Top profiles:\n{}",
        Console::default().render(&print::tabulate_profiles(&report.top_profiles))
    );
    for (league, count) in league_counts(&output.shortlist) {
        debug!("shortlist {league}: {count}");
    }

    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("create {}", config.out_dir.display()))?;
    let csv_path = config.out_dir.join(SHORTLIST_CSV);
    report_export::write_shortlist_csv(&csv_path, &output.shortlist)?;
    let xlsx_path = config.out_dir.join(REPORT_XLSX);
    let export = report_export::export_workbook(&xlsx_path, &output, &report)?;
    info!(
        "wrote {} ({} shortlisted, {} pool rows, {} leagues, {} profiles) and {}",
        xlsx_path.display(),
        export.shortlist_rows,
        export.pool_rows,
        export.league_rows,
        export.profile_rows,
        csv_path.display()
    );

    Ok(())
}
