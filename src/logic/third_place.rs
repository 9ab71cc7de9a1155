//! Third-place playoff between the two semifinal losers.

use crate::models::{Match, THIRD_PLACE_MATCH_ID, THIRD_PLACE_ROUND_INDEX};

/// Build the third-place playoff from two decided semifinals.
///
/// Lower seed goes first. If only one semifinal produced a loser (the other was a bye), that
/// loser takes third place without playing: the match is created already decided.
/// Returns None while a semifinal is pending, or if neither semifinal has a loser.
pub fn resolve_third_place(semi_1: &Match, semi_2: &Match) -> Option<Match> {
    if !semi_1.is_decided() || !semi_2.is_decided() {
        return None;
    }
    let third_place = match (semi_1.loser(), semi_2.loser()) {
        (Some(a), Some(b)) => {
            let (first, second) = if a.seed <= b.seed { (a, b) } else { (b, a) };
            Match::new(
                THIRD_PLACE_MATCH_ID,
                THIRD_PLACE_ROUND_INDEX,
                0,
                Some(first.clone()),
                Some(second.clone()),
            )
        }
        (Some(only), None) | (None, Some(only)) => {
            let mut m = Match::new(
                THIRD_PLACE_MATCH_ID,
                THIRD_PLACE_ROUND_INDEX,
                0,
                Some(only.clone()),
                None,
            );
            m.winner = Some(only.clone());
            m
        }
        (None, None) => return None,
    };
    Some(third_place)
}
