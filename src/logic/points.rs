//! Competition points: qualification rank award plus bracket placement award.

use crate::logic::seeding::qualification_ranking;
use crate::models::{Bracket, Entrant, EntrantId, Match};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Points for one placement band (inclusive, 1-based ranks).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointsBand {
    pub from: u32,
    pub to: u32,
    pub points: f64,
}

const fn band(from: u32, to: u32, points: f64) -> PointsBand {
    PointsBand { from, to, points }
}

/// Qualification award by rank. Ranks past the last band earn nothing.
pub const QUALIFICATION_POINTS: [PointsBand; 10] = [
    band(1, 1, 12.0),
    band(2, 2, 10.0),
    band(3, 3, 8.0),
    band(4, 4, 6.0),
    band(5, 6, 4.0),
    band(7, 8, 3.0),
    band(9, 12, 2.0),
    band(13, 16, 1.0),
    band(17, 24, 0.5),
    band(25, 32, 0.25),
];

pub const WINNER_POINTS: f64 = 100.0;
pub const RUNNER_UP_POINTS: f64 = 88.0;
pub const THIRD_PLACE_POINTS: f64 = 76.0;
pub const FOURTH_PLACE_POINTS: f64 = 64.0;

/// Flat award for losers of the round with `participants / 2` matches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EliminationTier {
    pub participants: usize,
    pub points: f64,
}

pub const ELIMINATION_TIERS: [EliminationTier; 4] = [
    EliminationTier { participants: 8, points: 48.0 },
    EliminationTier { participants: 16, points: 32.0 },
    EliminationTier { participants: 32, points: 16.0 },
    EliminationTier { participants: 64, points: 10.0 },
];

/// Qualification points for a 1-based rank.
pub fn qualification_points(rank: u32) -> f64 {
    QUALIFICATION_POINTS
        .iter()
        .find(|b| (b.from..=b.to).contains(&rank))
        .map_or(0.0, |b| b.points)
}

/// Qualification award table for display.
pub fn qualification_points_table() -> Vec<PointsBand> {
    QUALIFICATION_POINTS.to_vec()
}

/// Bracket placement table for display: top four, then one band per elimination tier.
pub fn bracket_points_table() -> Vec<PointsBand> {
    let mut table = vec![
        band(1, 1, WINNER_POINTS),
        band(2, 2, RUNNER_UP_POINTS),
        band(3, 3, THIRD_PLACE_POINTS),
        band(4, 4, FOURTH_PLACE_POINTS),
    ];
    table.extend(ELIMINATION_TIERS.iter().map(|t| {
        band(t.participants as u32 / 2 + 1, t.participants as u32, t.points)
    }));
    table
}

fn credit(points: &mut HashMap<EntrantId, f64>, entrant: Option<&Entrant>, amount: f64) {
    if let Some(e) = entrant {
        *points.entry(e.id).or_insert(0.0) += amount;
    }
}

/// Points earned by every entrant in one competition.
///
/// `entrants` is the full competition field (unsorted, with scores); everyone in it gets an
/// entry, defaulting to 0. The top four come from the final and the third-place playoff;
/// losers of tier rounds (quarterfinals and earlier) get the tier's flat award unless already
/// placed in the top four.
pub fn compute_competition_points(
    entrants: &[Entrant],
    bracket: &Bracket,
    third_place: Option<&Match>,
) -> HashMap<EntrantId, f64> {
    let mut points: HashMap<EntrantId, f64> = entrants.iter().map(|e| (e.id, 0.0)).collect();

    for (rank, entrant) in qualification_ranking(entrants).iter().enumerate() {
        credit(&mut points, Some(entrant), qualification_points(rank as u32 + 1));
    }

    let final_match = bracket.final_match();
    let winner = final_match.and_then(|m| m.winner.as_ref());
    let runner_up = final_match.and_then(Match::loser);
    let third = third_place.and_then(|m| m.winner.as_ref());
    let fourth = third_place.and_then(Match::loser);

    credit(&mut points, winner, WINNER_POINTS);
    credit(&mut points, runner_up, RUNNER_UP_POINTS);
    credit(&mut points, third, THIRD_PLACE_POINTS);
    credit(&mut points, fourth, FOURTH_PLACE_POINTS);

    let top_four: HashSet<EntrantId> = [winner, runner_up, third, fourth]
        .into_iter()
        .flatten()
        .map(|e| e.id)
        .collect();

    for tier in &ELIMINATION_TIERS {
        let Some(round) = bracket
            .rounds()
            .iter()
            .find(|r| r.len() * 2 == tier.participants)
        else {
            continue;
        };
        for loser in round.iter().filter_map(Match::loser) {
            if !top_four.contains(&loser.id) {
                credit(&mut points, Some(loser), tier.points);
            }
        }
    }
    points
}
