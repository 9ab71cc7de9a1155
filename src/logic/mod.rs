//! Season business logic: seeding, bracket, match results, points, standings, lifecycle.

mod advance;
mod bracket;
mod competition;
mod demo;
mod export;
mod points;
mod seeding;
mod standings;
mod third_place;

pub use advance::{is_finished, set_winner, Advance};
pub use bracket::{bracket_size, build_bracket, seeding_order};
pub use competition::{
    abort_competition, add_late_entrant, finish_competition, record_score, record_winner,
    reset_championship, start_bracket, start_competition,
};
pub use demo::generate_demo_entrants;
pub use export::standings_to_csv;
pub use points::{
    bracket_points_table, compute_competition_points, qualification_points,
    qualification_points_table, EliminationTier, PointsBand, ELIMINATION_TIERS,
    FOURTH_PLACE_POINTS, QUALIFICATION_POINTS, RUNNER_UP_POINTS, THIRD_PLACE_POINTS, WINNER_POINTS,
};
pub use seeding::{assign_seeds, qualification_ranking, MIN_PARTICIPANTS};
pub use standings::apply_points_to_standings;
pub use third_place::resolve_third_place;
