//! Bracket construction: standard seeding order, round tree, bye auto-advance.

use crate::models::{Bracket, Entrant, Match, MatchId, THIRD_PLACE_MATCH_ID};
use std::collections::HashMap;

/// Smallest power of two that holds `count` entrants.
pub fn bracket_size(count: usize) -> usize {
    count.max(1).next_power_of_two()
}

/// Standard seeding order for a bracket of `size` slots (a power of two).
///
/// Built by mirrored pairing: each seed `s` of the order of length `L` expands into the pair
/// `s, 2L + 1 - s`, written in reverse at odd positions. This gives `[1, 4, 3, 2]` and
/// `[1, 8, 5, 4, 3, 6, 7, 2]`: seeds 1 and 2 sit at opposite ends, so they can only meet in
/// the final.
pub fn seeding_order(size: usize) -> Vec<u32> {
    let mut seeds: Vec<u32> = vec![1];
    while seeds.len() < size {
        let next_len = seeds.len() as u32 * 2;
        seeds = seeds
            .iter()
            .enumerate()
            .flat_map(|(i, &s)| {
                let mirror = next_len + 1 - s;
                if i % 2 == 0 {
                    [s, mirror]
                } else {
                    [mirror, s]
                }
            })
            .collect();
    }
    seeds
}

/// Hands out match ids in creation order, skipping the third-place id.
struct MatchIds(MatchId);

impl MatchIds {
    fn next(&mut self) -> MatchId {
        if self.0 == THIRD_PLACE_MATCH_ID {
            self.0 += 1;
        }
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Build the knockout bracket for seeded entrants (seeds 1..=n, as produced by `assign_seeds`).
///
/// Byes are resolved immediately: a first-round match with a single entrant is already won by
/// that entrant, and later-round slots fed only by byes are filled at construction time.
/// Fewer than two entrants gives an empty bracket.
pub fn build_bracket(seeded: &[Entrant]) -> Bracket {
    if seeded.len() < 2 {
        return Bracket::default();
    }
    let size = bracket_size(seeded.len());
    let by_seed: HashMap<u32, &Entrant> = seeded.iter().map(|e| (e.seed, e)).collect();
    let order = seeding_order(size);
    let mut ids = MatchIds(0);

    let first_round: Vec<Match> = order
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let p1 = by_seed.get(&pair[0]).map(|&e| e.clone());
            let p2 = by_seed.get(&pair[1]).map(|&e| e.clone());
            let bye_winner = match (&p1, &p2) {
                (Some(p), None) | (None, Some(p)) => Some(p.clone()),
                _ => None,
            };
            let mut m = Match::new(ids.next(), 0, i as u32, p1, p2);
            m.winner = bye_winner;
            m.order_by_seed();
            m
        })
        .collect();

    let num_rounds = size.trailing_zeros() as usize;
    let mut rounds: Vec<Vec<Match>> = Vec::with_capacity(num_rounds);
    rounds.push(first_round);

    for round_index in 1..num_rounds {
        let previous = &rounds[round_index - 1];
        let current: Vec<Match> = previous
            .chunks_exact(2)
            .enumerate()
            .map(|(i, feeders)| {
                let mut m = Match::new(
                    ids.next(),
                    round_index as i32,
                    i as u32,
                    feeders[0].winner.clone(),
                    feeders[1].winner.clone(),
                );
                m.order_by_seed();
                m
            })
            .collect();
        let next_ids: Vec<MatchId> = current.iter().map(|m| m.id).collect();
        for (i, m) in rounds[round_index - 1].iter_mut().enumerate() {
            m.next_match_id = Some(next_ids[i / 2]);
        }
        rounds.push(current);
    }

    log::debug!(
        "built bracket: {} entrants, {} slots, {} rounds",
        seeded.len(),
        size,
        num_rounds
    );
    Bracket::from_rounds(rounds)
}
