use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::market_report::{DecisionPoint, ExecutiveKpis, LeagueMarketRow, PlayerProfile};
use crate::stats::ScoredPlayer;

pub fn tabulate_shortlist(shortlist: &[ScoredPlayer]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Player".into(),
                "Team".into(),
                "League".into(),
                "Games".into(),
                "G/90".into(),
                "Score".into(),
                "Reg.".into(),
                "C/B".into(),
            ],
        ));
    for (idx, p) in shortlist.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", idx + 1).into(),
                p.player.name.clone().into(),
                p.player.team.clone().into(),
                p.player.league.replace('_', " ").into(),
                p.player.stats.games.to_string().into(),
                format!("{:.2}", p.player.per90.goals).into(),
                format!("{:.2}", p.weighted_score).into(),
                format!("{:.2}", p.regularity_factor).into(),
                format!("{:.2}", p.cost_benefit).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_leagues(rows: &[LeagueMarketRow]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "League".into(),
                "Players".into(),
                "Rate %".into(),
                "C/B".into(),
            ],
        ));
    for row in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                row.label.clone().into(),
                row.shortlisted.to_string().into(),
                format!("{:.1}", row.selection_rate_pct).into(),
                format!("{:.2}", row.mean_cost_benefit).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_kpis(kpis: &ExecutiveKpis) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(20)).with(Left)),
        Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
    ]);
    for (label, value) in kpis.summary_lines() {
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), value.into()],
        ));
    }
    table
}

pub fn tabulate_decision_matrix(points: &[DecisionPoint]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(11)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Player".into(),
                "League".into(),
                "Score".into(),
                "C/B".into(),
                "Quadrant".into(),
            ],
        ));
    for point in points {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                point.name.clone().into(),
                point.league.replace('_', " ").into(),
                format!("{:.2}", point.weighted_score).into(),
                format!("{:.2}", point.cost_benefit).into(),
                format!("{:?}", point.quadrant).into(),
            ],
        ));
    }
    table
}

/// Normalised profile values, one row per player.
pub fn tabulate_profiles(profiles: &[PlayerProfile]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Player".into(),
                "G/90".into(),
                "A/90".into(),
                "Eff.".into(),
                "Reg.".into(),
            ],
        ));
    for profile in profiles {
        let norm = &profile.normalised;
        table.push_row(Row::new(
            Styles::default(),
            vec![
                profile.rank.to_string().into(),
                profile.name.clone().into(),
                format!("{:.2}", norm.goals_per90).into(),
                format!("{:.2}", norm.assists_per90).into(),
                format!("{:.2}", norm.finishing_efficiency).into(),
                format!("{:.2}", norm.regularity).into(),
            ],
        ));
    }
    table
}
