use crate::stats::ScoredPlayer;

/// Top `n` players by weighted score, highest first. The sort is stable, so
/// equal scores keep their pool order.
pub fn select_top(scored: &[ScoredPlayer], n: usize) -> Vec<ScoredPlayer> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    ranked.truncate(n);
    ranked
}

/// Shortlisted players per league, most represented league first.
pub fn league_counts(shortlist: &[ScoredPlayer]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for player in shortlist {
        match counts.iter_mut().find(|(league, _)| *league == player.player.league) {
            Some((_, count)) => *count += 1,
            None => counts.push((player.player.league.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
