//! Demo data: fill a qualification round with random scores.

use crate::logic::competition::add_late_entrant;
use crate::models::{EntrantId, SeasonError, SeasonState};
use rand::Rng;

/// Add "Entrant 1".."Entrant n" to the current qualification with scores in 1..=100.
///
/// Names already in the season are reused and just get a new score.
pub fn generate_demo_entrants<R: Rng>(
    season: &mut SeasonState,
    count: usize,
    rng: &mut R,
) -> Result<Vec<EntrantId>, SeasonError> {
    (1..=count)
        .map(|i| {
            let score = rng.gen_range(1..=100);
            add_late_entrant(season, &format!("Entrant {i}"), Some(score))
        })
        .collect()
}
