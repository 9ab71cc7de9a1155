//! Match results: record a winner, move it into the next round, open the third-place playoff.

use crate::logic::third_place::resolve_third_place;
use crate::models::{Bracket, EntrantId, Match, MatchId, THIRD_PLACE_MATCH_ID};
use serde::Serialize;

/// Outcome of a `set_winner` call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Advance {
    /// False when the call was ignored (unknown match, already decided, not a participant).
    pub applied: bool,
    /// Final decided and third-place playoff decided or not played.
    pub finished: bool,
}

/// Record the winner of a pending match with both slots filled. Returns false if ignored.
fn decide(m: &mut Match, winner_id: EntrantId) -> bool {
    if m.is_decided() || !m.is_ready() {
        return false;
    }
    match m.participant(winner_id).cloned() {
        Some(winner) => {
            m.winner = Some(winner);
            true
        }
        None => false,
    }
}

/// True when the final has a winner and the third-place playoff is decided or not played.
pub fn is_finished(bracket: &Bracket, third_place: Option<&Match>) -> bool {
    let final_decided = bracket.final_match().is_some_and(Match::is_decided);
    let third_place_done = !bracket.has_third_place() || third_place.is_some_and(Match::is_decided);
    final_decided && third_place_done
}

/// Set the winner of a bracket match or of the third-place playoff (by its reserved id).
///
/// Invalid calls are ignored and leave the state unchanged: unknown match, match already
/// decided, match still waiting for an opponent, or winner not in the match. Repeating a
/// delivered result is therefore harmless.
///
/// On success the winner is written into the next match (first slot for an even
/// `match_index`, second for odd) and that match is reordered by seed once both slots are
/// filled. The third-place playoff is created as soon as both semifinals are decided,
/// including for a state that arrived with decided semifinals and no playoff.
pub fn set_winner(
    bracket: &mut Bracket,
    third_place: &mut Option<Match>,
    match_id: MatchId,
    winner_id: EntrantId,
) -> Advance {
    ensure_third_place(bracket, third_place);
    let applied = if match_id == THIRD_PLACE_MATCH_ID {
        third_place
            .as_mut()
            .is_some_and(|m| decide(m, winner_id))
    } else {
        advance_bracket(bracket, match_id, winner_id)
    };
    if applied {
        ensure_third_place(bracket, third_place);
    }

    let finished = is_finished(bracket, third_place.as_ref());
    if applied {
        log::debug!("match {} won by entrant {}", match_id, winner_id);
        if finished {
            log::info!("bracket finished");
        }
    }
    Advance { applied, finished }
}

fn advance_bracket(bracket: &mut Bracket, match_id: MatchId, winner_id: EntrantId) -> bool {
    let Some(m) = bracket.get_mut(match_id) else {
        return false;
    };
    if !decide(m, winner_id) {
        return false;
    }
    let winner = m.winner.clone();
    let to_first_slot = m.match_index % 2 == 0;
    let next_match_id = m.next_match_id;

    if let Some(next) = next_match_id.and_then(|id| bracket.get_mut(id)) {
        if !next.is_decided() {
            if to_first_slot {
                next.participant1 = winner;
            } else {
                next.participant2 = winner;
            }
            next.order_by_seed();
        }
    }
    true
}

/// Build the third-place playoff once both semifinals are decided. Never replaces an existing one.
fn ensure_third_place(bracket: &Bracket, third_place: &mut Option<Match>) {
    if third_place.is_some() || !bracket.has_third_place() {
        return;
    }
    let Some(round) = bracket.semifinal_round() else {
        return;
    };
    if let [semi_1, semi_2] = bracket.round(round) {
        *third_place = resolve_third_place(semi_1, semi_2);
        if let Some(tp) = third_place.as_ref() {
            log::info!(
                "third-place playoff created{}",
                if tp.is_decided() { " (decided by bye)" } else { "" }
            );
        }
    }
}
