//! Entrant (one competition) and ChampionshipStanding (whole season).

use serde::{Deserialize, Serialize};

/// Unique identifier for an entrant. Shared by the season standing and its competition entry.
pub type EntrantId = u64;

/// An entrant in a single competition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    /// Qualification score. None until submitted.
    pub score: Option<i64>,
    /// Bracket seed (1-based). 0 before seeding.
    pub seed: u32,
}

impl Entrant {
    /// Create an unseeded entrant without a score.
    pub fn new(id: EntrantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: None,
            seed: 0,
        }
    }

    /// Same entrant with a score set (builder style, handy for tests and demo data).
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    /// Entered the bracket: score present and strictly positive.
    pub fn is_qualified(&self) -> bool {
        matches!(self.score, Some(s) if s > 0)
    }
}

/// A season participant and the points earned in each competition held so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipStanding {
    pub id: EntrantId,
    pub name: String,
    /// One value per competition; index = competition number.
    pub points_per_competition: Vec<f64>,
}

impl ChampionshipStanding {
    /// New standing that joins after `competitions_held` competitions (zero for each missed one).
    pub fn new(id: EntrantId, name: impl Into<String>, competitions_held: u32) -> Self {
        Self {
            id,
            name: name.into(),
            points_per_competition: vec![0.0; competitions_held as usize],
        }
    }

    pub fn total_points(&self) -> f64 {
        self.points_per_competition.iter().sum()
    }

    /// Fresh competition entry for this standing.
    pub fn to_entrant(&self) -> Entrant {
        Entrant::new(self.id, self.name.clone())
    }
}
