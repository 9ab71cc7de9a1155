//! Season ledger: fold one competition's points into the standings.

use crate::models::{ChampionshipStanding, EntrantId};
use std::collections::HashMap;

/// Append this competition's points (0 if absent) to every standing, then rank by total.
///
/// The sort is stable: equal totals keep their previous order, which for a new season is
/// registration order.
pub fn apply_points_to_standings(
    standings: &[ChampionshipStanding],
    points: &HashMap<EntrantId, f64>,
) -> Vec<ChampionshipStanding> {
    let mut updated: Vec<ChampionshipStanding> = standings
        .iter()
        .map(|s| {
            let mut s = s.clone();
            s.points_per_competition
                .push(points.get(&s.id).copied().unwrap_or(0.0));
            s
        })
        .collect();
    updated.sort_by(|a, b| b.total_points().total_cmp(&a.total_points()));
    updated
}
