//! Season championship organizer: library with models and business logic.
//!
//! A season is a series of competitions. Each competition seeds a knockout bracket from a
//! qualification round, plays it out (with a third-place playoff) and folds the resulting
//! points into the season standings. Everything here is synchronous and free of I/O; the
//! `web` binary owns state and transport.

pub mod logic;
pub mod models;

pub use logic::{
    abort_competition, add_late_entrant, apply_points_to_standings, assign_seeds,
    bracket_points_table, bracket_size, build_bracket, compute_competition_points,
    finish_competition, generate_demo_entrants, is_finished, qualification_points,
    qualification_points_table, qualification_ranking, record_score, record_winner,
    reset_championship, resolve_third_place, seeding_order, set_winner, standings_to_csv,
    start_bracket, start_competition, Advance, PointsBand, MIN_PARTICIPANTS,
};
pub use models::{
    Bracket, ChampionshipStanding, Entrant, EntrantId, Match, MatchId, Phase, SeasonError,
    SeasonState, THIRD_PLACE_MATCH_ID, THIRD_PLACE_ROUND_INDEX,
};
