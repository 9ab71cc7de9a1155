//! Match and Bracket (the round-by-round match arena).

use crate::models::entrant::{Entrant, EntrantId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match within one competition.
pub type MatchId = u32;

/// Reserved id of the third-place playoff. Bracket ids never use it.
pub const THIRD_PLACE_MATCH_ID: MatchId = 999;

/// Round index of the third-place playoff (outside the main tree).
pub const THIRD_PLACE_ROUND_INDEX: i32 = -1;

/// A single knockout match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// 0 = first round; -1 for the third-place playoff.
    pub round_index: i32,
    /// Position within the round. Parity picks the slot in the next match.
    pub match_index: u32,
    pub participant1: Option<Entrant>,
    pub participant2: Option<Entrant>,
    /// None while pending. Always one of the two participants once set.
    pub winner: Option<Entrant>,
    /// Match consuming this winner. None for the final and the third-place playoff.
    pub next_match_id: Option<MatchId>,
}

impl Match {
    pub fn new(
        id: MatchId,
        round_index: i32,
        match_index: u32,
        participant1: Option<Entrant>,
        participant2: Option<Entrant>,
    ) -> Self {
        Self {
            id,
            round_index,
            match_index,
            participant1,
            participant2,
            winner: None,
            next_match_id: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both slots hold an entrant.
    pub fn is_ready(&self) -> bool {
        self.participant1.is_some() && self.participant2.is_some()
    }

    /// The slot occupied by `id`, if any.
    pub fn participant(&self, id: EntrantId) -> Option<&Entrant> {
        self.participant1
            .iter()
            .chain(self.participant2.iter())
            .find(|e| e.id == id)
    }

    /// The non-winning participant of a decided match. None while pending or for a bye.
    pub fn loser(&self) -> Option<&Entrant> {
        let winner = self.winner.as_ref()?;
        if self.participant1.as_ref().map(|p| p.id) == Some(winner.id) {
            self.participant2.as_ref()
        } else {
            self.participant1.as_ref()
        }
    }

    /// Put the lower seed in the first slot when both slots are filled.
    pub fn order_by_seed(&mut self) {
        let out_of_order = matches!(
            (&self.participant1, &self.participant2),
            (Some(p1), Some(p2)) if p1.seed > p2.seed
        );
        if out_of_order {
            std::mem::swap(&mut self.participant1, &mut self.participant2);
        }
    }
}

/// The knockout tree: rounds of matches, first round first, final last.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bracket {
    rounds: Vec<Vec<Match>>,
}

impl Bracket {
    pub fn from_rounds(rounds: Vec<Vec<Match>>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Vec<Match>] {
        &self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Number of first-round slots (a power of two), 0 for an empty bracket.
    pub fn size(&self) -> usize {
        self.rounds.first().map_or(0, |r| r.len() * 2)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|r| r.first())
    }

    /// Index of the semifinal round (second to last), if the bracket has one.
    pub fn semifinal_round(&self) -> Option<usize> {
        self.rounds.len().checked_sub(2)
    }

    /// A third-place playoff is played when there are semifinals with two matches.
    pub fn has_third_place(&self) -> bool {
        self.rounds.len() > 1 && self.rounds.first().is_some_and(|r| r.len() > 1)
    }

    /// Round and position of a match id.
    pub fn locate(&self, id: MatchId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round.iter().position(|m| m.id == id).map(|i| (r, i))
        })
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.locate(id).map(|(r, i)| &self.rounds[r][i])
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        let (r, i) = self.locate(id)?;
        Some(&mut self.rounds[r][i])
    }

    /// Matches of one round (empty slice if out of range).
    pub fn round(&self, index: usize) -> &[Match] {
        self.rounds.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// All matches, round by round.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flatten()
    }
}
