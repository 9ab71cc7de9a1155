//! Qualification: rank entrants by score and assign bracket seeds.

use crate::models::{Entrant, SeasonError};

/// Minimum number of qualified entrants needed to build a bracket.
pub const MIN_PARTICIPANTS: usize = 2;

/// Entrants with a positive score, best score first. Equal scores keep input order.
///
/// Seeds are assigned by rank (1-based) but no minimum is enforced.
pub fn qualification_ranking(entrants: &[Entrant]) -> Vec<Entrant> {
    let mut qualified: Vec<Entrant> = entrants
        .iter()
        .filter(|e| e.is_qualified())
        .cloned()
        .collect();
    // Stable sort: ties stay in input order.
    qualified.sort_by(|a, b| b.score.cmp(&a.score));
    for (rank, entrant) in qualified.iter_mut().enumerate() {
        entrant.seed = rank as u32 + 1;
    }
    qualified
}

/// Rank qualified entrants and assign seed = rank.
///
/// Fails with `NotEnoughQualified` when fewer than [`MIN_PARTICIPANTS`] have a positive score.
pub fn assign_seeds(entrants: &[Entrant]) -> Result<Vec<Entrant>, SeasonError> {
    let seeded = qualification_ranking(entrants);
    if seeded.len() < MIN_PARTICIPANTS {
        return Err(SeasonError::NotEnoughQualified {
            required: MIN_PARTICIPANTS,
            qualified: seeded.len(),
        });
    }
    log::debug!("seeded {} of {} entrants", seeded.len(), entrants.len());
    Ok(seeded)
}
