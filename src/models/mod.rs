//! Data structures for the season: entrants, standings, matches, bracket, season state.

mod entrant;
mod game;
mod season;

pub use entrant::{ChampionshipStanding, Entrant, EntrantId};
pub use game::{Bracket, Match, MatchId, THIRD_PLACE_MATCH_ID, THIRD_PLACE_ROUND_INDEX};
pub use season::{Phase, SeasonError, SeasonState};
