use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::market_report::{
    DecisionPoint, LeagueMarketRow, MarketReport, PlayerComparison, PlayerProfile,
};
use crate::pipeline::PipelineOutput;
use crate::stats::ScoredPlayer;

pub const SCORED_COLUMNS: &[&str] = &[
    "Id",
    "Name",
    "Team",
    "Position",
    "Goals",
    "Assists",
    "xG",
    "xA",
    "Shots",
    "Key Passes",
    "Minutes",
    "Games",
    "Goals/90",
    "Assists/90",
    "xG/90",
    "xA/90",
    "Shots/90",
    "Key Passes/90",
    "League",
    "Season",
    "Finishing Efficiency",
    "Regularity Factor",
    "Offensive Impact",
    "Base Score",
    "Weighted Score",
    "Versatile",
    "Risk Tier",
    "League Factor",
    "Cost Benefit",
];

pub const DECISION_COLUMNS: &[&str] = &[
    "Name",
    "League",
    "Weighted Score",
    "Cost Benefit",
    "Quadrant",
];

pub const PROFILE_COLUMNS: &[&str] = &[
    "Rank",
    "Name",
    "League",
    "Games",
    "Weighted Score",
    "Goals/90",
    "Assists/90",
    "Finishing Efficiency",
    "Regularity",
    "Goals/90 (norm)",
    "Assists/90 (norm)",
    "Finishing Efficiency (norm)",
    "Regularity (norm)",
];

/// Data rows written per sheet, headers excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub shortlist_rows: usize,
    pub pool_rows: usize,
    pub league_rows: usize,
    pub comparison_rows: usize,
    pub decision_rows: usize,
    pub profile_rows: usize,
    pub kpi_rows: usize,
}

/// Write the shortlist as CSV: header from [`SCORED_COLUMNS`], floats at two decimals.
pub fn write_shortlist_csv(path: &Path, shortlist: &[ScoredPlayer]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed creating {}", path.display()))?;
    writer
        .write_record(SCORED_COLUMNS)
        .context("write csv header")?;
    for player in shortlist {
        writer
            .write_record(scored_row(player))
            .with_context(|| format!("write csv row {}", player.player.name))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn export_workbook(
    path: &Path,
    output: &PipelineOutput,
    report: &MarketReport,
) -> Result<ExportReport> {
    let header = header_row(SCORED_COLUMNS);

    let mut shortlist_rows = vec![header.clone()];
    shortlist_rows.extend(output.shortlist.iter().map(scored_row));

    let mut pool_rows = vec![header];
    pool_rows.extend(output.eligible.iter().map(scored_row));

    let mut league_rows = vec![vec![
        "League".to_string(),
        "Shortlisted".to_string(),
        "Pool".to_string(),
        "Selection Rate %".to_string(),
        "Mean Cost Benefit".to_string(),
        "Mean Weighted Score".to_string(),
    ]];
    league_rows.extend(report.leagues.iter().map(league_row));

    let mut comparison_rows = vec![vec![
        "Rank".to_string(),
        "Name".to_string(),
        "Team".to_string(),
        "League".to_string(),
        "Goals/90".to_string(),
        "vs Market %".to_string(),
        "Tier".to_string(),
    ]];
    comparison_rows.extend(report.comparisons.iter().map(comparison_row));

    let mut decision_rows = vec![header_row(DECISION_COLUMNS)];
    decision_rows.extend(report.decision_matrix.iter().map(decision_row));

    let mut profile_rows = vec![header_row(PROFILE_COLUMNS)];
    profile_rows.extend(report.top_profiles.iter().map(profile_row));

    let mut kpi_rows = vec![vec!["KPI".to_string(), "Value".to_string()]];
    kpi_rows.extend(
        report
            .kpis
            .summary_lines()
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value]),
    );

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Shortlist", &shortlist_rows),
        ("EligiblePool", &pool_rows),
        ("LeagueMarket", &league_rows),
        ("Comparison", &comparison_rows),
        ("DecisionMatrix", &decision_rows),
        ("Profiles", &profile_rows),
        ("Kpis", &kpi_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        shortlist_rows: shortlist_rows.len().saturating_sub(1),
        pool_rows: pool_rows.len().saturating_sub(1),
        league_rows: league_rows.len().saturating_sub(1),
        comparison_rows: comparison_rows.len().saturating_sub(1),
        decision_rows: decision_rows.len().saturating_sub(1),
        profile_rows: profile_rows.len().saturating_sub(1),
        kpi_rows: kpi_rows.len().saturating_sub(1),
    })
}

pub fn scored_row(p: &ScoredPlayer) -> Vec<String> {
    let r = &p.player;
    vec![
        r.id.to_string(),
        r.name.clone(),
        r.team.clone(),
        r.position.clone(),
        r.stats.goals.to_string(),
        r.stats.assists.to_string(),
        fmt2(r.stats.xg),
        fmt2(r.stats.xa),
        r.stats.shots.to_string(),
        r.stats.key_passes.to_string(),
        r.stats.minutes.to_string(),
        r.stats.games.to_string(),
        fmt2(r.per90.goals),
        fmt2(r.per90.assists),
        fmt2(r.per90.xg),
        fmt2(r.per90.xa),
        fmt2(r.per90.shots),
        fmt2(r.per90.key_passes),
        r.league.clone(),
        r.season.to_string(),
        fmt2(p.finishing_efficiency),
        fmt2(p.regularity_factor),
        fmt2(p.offensive_impact),
        fmt2(p.base_score),
        fmt2(p.weighted_score),
        p.versatile.to_string(),
        p.risk_tier.map(|t| t.label().to_string()).unwrap_or_default(),
        fmt2(p.league_factor),
        fmt2(p.cost_benefit),
    ]
}

fn league_row(row: &LeagueMarketRow) -> Vec<String> {
    vec![
        row.label.clone(),
        row.shortlisted.to_string(),
        row.pool.to_string(),
        format!("{:.1}", row.selection_rate_pct),
        fmt2(row.mean_cost_benefit),
        fmt2(row.mean_weighted_score),
    ]
}

fn comparison_row(row: &PlayerComparison) -> Vec<String> {
    vec![
        row.rank.to_string(),
        row.name.clone(),
        row.team.clone(),
        row.league.clone(),
        fmt2(row.goals_per90),
        format!("{:+.0}", row.pct_vs_market),
        format!("{:?}", row.tier),
    ]
}

pub fn decision_row(point: &DecisionPoint) -> Vec<String> {
    vec![
        point.name.clone(),
        point.league.clone(),
        fmt2(point.weighted_score),
        fmt2(point.cost_benefit),
        format!("{:?}", point.quadrant),
    ]
}

pub fn profile_row(profile: &PlayerProfile) -> Vec<String> {
    let raw = &profile.raw;
    let norm = &profile.normalised;
    vec![
        profile.rank.to_string(),
        profile.name.clone(),
        profile.league.clone(),
        profile.games.to_string(),
        fmt2(profile.weighted_score),
        fmt2(raw.goals_per90),
        fmt2(raw.assists_per90),
        fmt2(raw.finishing_efficiency),
        fmt2(raw.regularity),
        fmt2(norm.goals_per90),
        fmt2(norm.assists_per90),
        fmt2(norm.finishing_efficiency),
        fmt2(norm.regularity),
    ]
}

fn header_row(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
