//! Bracket data models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TournamentError, TournamentResult};
use crate::matches::{Entrant, EntrantId, Match, MatchFormat, MatchId, MatchStatus};

/// Name of a bracket round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundName {
    /// Play-in round thinning the field to a power of two
    Preliminary,
    /// Round with the given number of entrants
    RoundOf(usize),
    Quarterfinal,
    Semifinal,
    Final,
    ThirdPlace,
}

impl RoundName {
    /// Name of a main-bracket round contested by `entrants` entrants
    pub fn for_size(entrants: usize) -> Self {
        match entrants {
            2 => RoundName::Final,
            4 => RoundName::Semifinal,
            8 => RoundName::Quarterfinal,
            n => RoundName::RoundOf(n),
        }
    }
}

impl fmt::Display for RoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundName::Preliminary => write!(f, "Preliminary"),
            RoundName::RoundOf(n) => write!(f, "Round of {n}"),
            RoundName::Quarterfinal => write!(f, "Quarterfinal"),
            RoundName::Semifinal => write!(f, "Semifinal"),
            RoundName::Final => write!(f, "Final"),
            RoundName::ThirdPlace => write!(f, "Third place"),
        }
    }
}

/// A round and the matches it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRound {
    /// Round index, equal to `Match::round` of its matches
    pub index: u32,
    pub name: RoundName,
    pub matches: Vec<MatchId>,
}

/// Bracket construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Scoring rules for every match
    pub format: MatchFormat,
    /// Add a third-place match between the semifinal losers
    pub third_place_match: bool,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            format: MatchFormat::default(),
            third_place_match: true,
        }
    }
}

/// Single-elimination bracket
///
/// Matches are indexed by their [`MatchId`]; forward links between them
/// form a directed acyclic graph ending at the final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Entrants in seed order
    pub entrants: Vec<Entrant>,
    /// All matches, `matches[id].id == id`
    pub matches: Vec<Match>,
    /// Rounds in play order, third place last
    pub rounds: Vec<BracketRound>,
    /// Smallest power of two holding every entrant
    pub total_slots: usize,
    /// Entrants skipping the preliminary round
    pub byes: usize,
}

impl Bracket {
    /// Get a match by ID
    pub fn get(&self, id: MatchId) -> TournamentResult<&Match> {
        self.matches.get(id).ok_or(TournamentError::MatchNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: MatchId) -> TournamentResult<&mut Match> {
        self.matches
            .get_mut(id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// First round with the given name
    pub fn round(&self, name: RoundName) -> Option<&BracketRound> {
        self.rounds.iter().find(|round| round.name == name)
    }

    /// Matches of a named round
    pub fn round_matches(&self, name: RoundName) -> Vec<&Match> {
        self.round(name)
            .map(|round| round.matches.iter().map(|&id| &self.matches[id]).collect())
            .unwrap_or_default()
    }

    /// Matches of the preliminary round (empty when the field has no byes)
    pub fn preliminary_matches(&self) -> Vec<&Match> {
        self.round_matches(RoundName::Preliminary)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.round_matches(RoundName::Final).into_iter().next()
    }

    pub fn third_place_match(&self) -> Option<&Match> {
        self.round_matches(RoundName::ThirdPlace).into_iter().next()
    }

    /// Name of the round a match belongs to
    pub fn round_name(&self, id: MatchId) -> Option<RoundName> {
        let m = self.matches.get(id)?;
        self.rounds
            .iter()
            .find(|round| round.index == m.round)
            .map(|round| round.name)
    }

    /// Look up an entrant
    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|entrant| entrant.id == id)
    }

    /// Champion, once the final is decided
    pub fn champion(&self) -> Option<EntrantId> {
        self.final_match().and_then(|m| m.winner)
    }

    /// Every match completed
    pub fn is_complete(&self) -> bool {
        self.matches
            .iter()
            .all(|m| m.status == MatchStatus::Completed)
    }

    /// Matches with both entrants known and no result yet
    pub fn playable_matches(&self) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.is_ready() && m.status != MatchStatus::Completed)
            .collect()
    }
}
