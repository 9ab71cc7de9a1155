//! SeasonState, Phase and SeasonError.

use crate::models::entrant::{ChampionshipStanding, Entrant, EntrantId};
use crate::models::game::{Bracket, Match};
use serde::{Deserialize, Serialize};

/// Errors that can occur during season operations.
#[derive(Clone, Debug, PartialEq)]
pub enum SeasonError {
    /// Too few entrants with a positive score to build a bracket.
    NotEnoughQualified { required: usize, qualified: usize },
    /// Season is not in a phase that allows this action.
    InvalidState,
    /// Entrant not found in the standings or the current competition.
    EntrantNotFound(EntrantId),
    /// An entrant with this name already exists (names are unique, case-insensitive).
    DuplicateEntrant,
    /// Entrant names must not be blank.
    EmptyName,
    /// Season length must be at least one competition.
    InvalidSeasonLength,
    /// Scores must not be negative.
    InvalidScore,
    /// State could not be encoded.
    Serialization(String),
}

impl std::fmt::Display for SeasonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonError::NotEnoughQualified { required, qualified } => write!(
                f,
                "Need at least {} entrants with a score above 0 to build the bracket ({} qualified)",
                required, qualified
            ),
            SeasonError::InvalidState => write!(f, "Invalid state for this action"),
            SeasonError::EntrantNotFound(_) => write!(f, "Entrant not found"),
            SeasonError::DuplicateEntrant => write!(f, "An entrant with this name already exists"),
            SeasonError::EmptyName => write!(f, "Name is required"),
            SeasonError::InvalidSeasonLength => write!(f, "Season must have at least one competition"),
            SeasonError::InvalidScore => write!(f, "Score must be a non-negative number"),
            SeasonError::Serialization(msg) => write!(f, "Could not encode season state: {}", msg),
        }
    }
}

impl std::error::Error for SeasonError {}

/// Current phase of the season.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Between competitions: registration, season length, standings table.
    #[default]
    ChampionshipView,
    /// Collecting qualification scores.
    Qualification,
    /// Knockout bracket in progress.
    Bracket,
    /// Final (and third-place playoff, if any) decided; points not yet applied.
    Finished,
}

/// Whole season: standings ledger plus the competition in progress.
///
/// This is also the persisted/transmitted shape; field names match the external JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonState {
    pub phase: Phase,
    pub standings: Vec<ChampionshipStanding>,
    pub competition_participants: Vec<Entrant>,
    #[serde(default)]
    pub bracket: Bracket,
    #[serde(default)]
    pub third_place_match: Option<Match>,
    #[serde(default)]
    pub total_competitions: Option<u32>,
    pub competitions_held: u32,
}

impl SeasonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All planned competitions have been held.
    pub fn is_season_finished(&self) -> bool {
        self.total_competitions
            .is_some_and(|total| self.competitions_held >= total)
    }

    /// Set how many competitions the season has.
    pub fn set_total_competitions(&mut self, total: u32) -> Result<(), SeasonError> {
        if total == 0 {
            return Err(SeasonError::InvalidSeasonLength);
        }
        self.total_competitions = Some(total);
        Ok(())
    }

    pub fn get_standing(&self, id: EntrantId) -> Option<&ChampionshipStanding> {
        self.standings.iter().find(|s| s.id == id)
    }

    pub fn find_standing_by_name(&self, name: &str) -> Option<&ChampionshipStanding> {
        self.standings
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Mutable reference to a competition entrant by id.
    pub fn get_participant_mut(&mut self, id: EntrantId) -> Option<&mut Entrant> {
        self.competition_participants.iter_mut().find(|p| p.id == id)
    }

    /// One past the largest id in use, or the lowest free id once the largest is `u64::MAX`.
    fn next_entrant_id(&self) -> EntrantId {
        let largest = self.standings.iter().map(|s| s.id).max().unwrap_or(0);
        largest.checked_add(1).unwrap_or_else(|| {
            (1..EntrantId::MAX)
                .find(|id| self.get_standing(*id).is_none())
                .unwrap_or(0)
        })
    }

    /// Register a new season participant. Names must be unique (case-insensitive).
    pub fn register(&mut self, name: impl Into<String>) -> Result<EntrantId, SeasonError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SeasonError::EmptyName);
        }
        if self.find_standing_by_name(name).is_some() {
            return Err(SeasonError::DuplicateEntrant);
        }
        let id = self.next_entrant_id();
        self.standings
            .push(ChampionshipStanding::new(id, name, self.competitions_held));
        log::debug!("registered entrant {} as {}", name, id);
        Ok(id)
    }

    /// Merge a standing registered elsewhere. A duplicate id or name is a no-op (returns false).
    /// The point list is padded or cut to `competitions_held` entries.
    pub fn merge_standing(&mut self, mut standing: ChampionshipStanding) -> bool {
        let duplicate = self.standings.iter().any(|s| {
            s.id == standing.id || s.name.eq_ignore_ascii_case(standing.name.trim())
        });
        if duplicate || standing.name.trim().is_empty() {
            return false;
        }
        standing.name = standing.name.trim().to_string();
        let held = self.competitions_held as usize;
        if standing.points_per_competition.len() > held {
            log::debug!(
                "dropping {} point entries past competition {} for {}",
                standing.points_per_competition.len() - held,
                held,
                standing.name
            );
        }
        standing.points_per_competition.resize(held, 0.0);
        self.standings.push(standing);
        true
    }

    /// Remove a participant from the season (between competitions, before the season ends).
    pub fn remove_standing(&mut self, id: EntrantId) -> Result<(), SeasonError> {
        if self.phase != Phase::ChampionshipView || self.is_season_finished() {
            return Err(SeasonError::InvalidState);
        }
        let idx = self
            .standings
            .iter()
            .position(|s| s.id == id)
            .ok_or(SeasonError::EntrantNotFound(id))?;
        self.standings.remove(idx);
        Ok(())
    }

    /// Standings ordered by total points, best first. Ties keep their current order.
    pub fn ranked_standings(&self) -> Vec<ChampionshipStanding> {
        let mut ranked = self.standings.clone();
        ranked.sort_by(|a, b| b.total_points().total_cmp(&a.total_points()));
        ranked
    }

    /// Number of competition entrants that would enter the bracket now.
    pub fn qualified_count(&self) -> usize {
        self.competition_participants
            .iter()
            .filter(|p| p.is_qualified())
            .count()
    }

    /// Live qualification table: every entrant with a submitted score, best first.
    pub fn qualification_leaderboard(&self) -> Vec<Entrant> {
        let mut scored: Vec<Entrant> = self
            .competition_participants
            .iter()
            .filter(|p| p.score.is_some())
            .cloned()
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Encode as the external JSON shape.
    pub fn to_json(&self) -> Result<String, SeasonError> {
        serde_json::to_string(self).map_err(|e| SeasonError::Serialization(e.to_string()))
    }

    /// Decode an external state blob. Anything that fails to parse or validate yields a fresh season.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<SeasonState>(json) {
            Ok(state) if state.is_consistent() => state,
            Ok(_) => {
                log::warn!("Discarding inconsistent season state, starting a fresh season");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not decode season state ({}), starting a fresh season", e);
                Self::default()
            }
        }
    }

    /// Structural checks serde cannot express.
    fn is_consistent(&self) -> bool {
        let held = self.competitions_held as usize;
        let ledger_ok = self
            .standings
            .iter()
            .all(|s| s.points_per_competition.len() == held);
        let winners_ok = self
            .bracket
            .matches()
            .chain(self.third_place_match.iter())
            .all(|m| match &m.winner {
                Some(w) => m.participant(w.id).is_some(),
                None => true,
            });
        ledger_ok && winners_ok
    }
}
