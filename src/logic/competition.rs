//! Competition lifecycle over the season: qualification → bracket → points → standings.

use crate::logic::advance::{set_winner, Advance};
use crate::logic::bracket::build_bracket;
use crate::logic::points::compute_competition_points;
use crate::logic::seeding::assign_seeds;
use crate::logic::standings::apply_points_to_standings;
use crate::models::{Bracket, EntrantId, MatchId, Phase, SeasonError, SeasonState};

/// Open the next competition: every standing becomes an entrant without a score.
pub fn start_competition(season: &mut SeasonState) -> Result<(), SeasonError> {
    if season.phase != Phase::ChampionshipView
        || season.total_competitions.is_none()
        || season.is_season_finished()
    {
        return Err(SeasonError::InvalidState);
    }
    season.competition_participants = season.standings.iter().map(|s| s.to_entrant()).collect();
    season.bracket = Bracket::default();
    season.third_place_match = None;
    season.phase = Phase::Qualification;
    log::info!(
        "competition {} started with {} entrants",
        season.competitions_held + 1,
        season.competition_participants.len()
    );
    Ok(())
}

fn validate_score(score: Option<i64>) -> Result<(), SeasonError> {
    match score {
        Some(s) if s < 0 => Err(SeasonError::InvalidScore),
        _ => Ok(()),
    }
}

/// Set (or clear, with None) an entrant's qualification score.
pub fn record_score(
    season: &mut SeasonState,
    entrant_id: EntrantId,
    score: Option<i64>,
) -> Result<(), SeasonError> {
    if season.phase != Phase::Qualification {
        return Err(SeasonError::InvalidState);
    }
    validate_score(score)?;
    let entrant = season
        .get_participant_mut(entrant_id)
        .ok_or(SeasonError::EntrantNotFound(entrant_id))?;
    entrant.score = score;
    Ok(())
}

/// Add an entrant during qualification. Registers the name in the season unless it already
/// exists there; an entrant already in the competition just gets the new score.
pub fn add_late_entrant(
    season: &mut SeasonState,
    name: &str,
    score: Option<i64>,
) -> Result<EntrantId, SeasonError> {
    if season.phase != Phase::Qualification {
        return Err(SeasonError::InvalidState);
    }
    validate_score(score)?;
    let existing = season.find_standing_by_name(name).map(|s| s.id);
    let id = match existing {
        Some(id) => id,
        None => season.register(name)?,
    };
    match season.get_participant_mut(id) {
        Some(entrant) => entrant.score = score,
        None => {
            let standing = season
                .get_standing(id)
                .ok_or(SeasonError::EntrantNotFound(id))?;
            let mut entrant = standing.to_entrant();
            entrant.score = score;
            season.competition_participants.push(entrant);
        }
    }
    Ok(id)
}

/// Seed the qualified entrants and build the bracket.
///
/// Fails with `NotEnoughQualified` (state untouched) if fewer than two have a positive score.
pub fn start_bracket(season: &mut SeasonState) -> Result<(), SeasonError> {
    if season.phase != Phase::Qualification {
        return Err(SeasonError::InvalidState);
    }
    let seeded = assign_seeds(&season.competition_participants)?;
    for p in &mut season.competition_participants {
        p.seed = seeded
            .iter()
            .find(|s| s.id == p.id)
            .map_or(0, |s| s.seed);
    }
    season.bracket = build_bracket(&seeded);
    season.third_place_match = None;
    season.phase = Phase::Bracket;
    log::info!(
        "bracket started: {} qualified, {} rounds",
        seeded.len(),
        season.bracket.num_rounds()
    );
    Ok(())
}

/// Record a match result. Ignored results come back with `applied == false`.
pub fn record_winner(
    season: &mut SeasonState,
    match_id: MatchId,
    winner_id: EntrantId,
) -> Result<Advance, SeasonError> {
    if season.phase != Phase::Bracket {
        return Err(SeasonError::InvalidState);
    }
    let advance = set_winner(
        &mut season.bracket,
        &mut season.third_place_match,
        match_id,
        winner_id,
    );
    if advance.finished {
        season.phase = Phase::Finished;
    }
    Ok(advance)
}

/// Fold the finished competition into the standings and return to the championship view.
pub fn finish_competition(season: &mut SeasonState) -> Result<(), SeasonError> {
    if season.phase != Phase::Finished {
        return Err(SeasonError::InvalidState);
    }
    let points = compute_competition_points(
        &season.competition_participants,
        &season.bracket,
        season.third_place_match.as_ref(),
    );
    season.standings = apply_points_to_standings(&season.standings, &points);
    season.competitions_held += 1;
    discard_competition(season);
    log::info!("competition {} applied to standings", season.competitions_held);
    Ok(())
}

/// Drop the competition in progress without awarding points.
pub fn abort_competition(season: &mut SeasonState) -> Result<(), SeasonError> {
    if season.phase == Phase::ChampionshipView {
        return Err(SeasonError::InvalidState);
    }
    discard_competition(season);
    log::info!("competition {} aborted", season.competitions_held + 1);
    Ok(())
}

fn discard_competition(season: &mut SeasonState) {
    season.competition_participants.clear();
    season.bracket = Bracket::default();
    season.third_place_match = None;
    season.phase = Phase::ChampionshipView;
}

/// Start the season over: same participants, no points, season length unset.
pub fn reset_championship(season: &mut SeasonState) {
    for s in &mut season.standings {
        s.points_per_competition.clear();
    }
    season.competitions_held = 0;
    season.total_competitions = None;
    discard_competition(season);
}
