//! Pool data model.

use serde::{Deserialize, Serialize};

use super::ranking::{Ranking, compute_ranking};
use super::schedule::{PoolFormat, rounds_for, schedule_pool};
use crate::errors::{TournamentError, TournamentResult};
use crate::matches::{
    Entrant, Match, MatchFormat, MatchId, MatchOutcome, MatchStatus, SetScore, ensure_unique,
};

/// A group of entrants playing each other
///
/// The ranking is never stored; [`Pool::ranking`] derives it from the
/// matches on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool name
    pub name: String,
    /// Pairing format
    pub format: PoolFormat,
    /// Entrants in seed order
    pub entrants: Vec<Entrant>,
    /// Scheduled matches
    pub matches: Vec<Match>,
}

impl Pool {
    /// Create a pool and schedule `rounds` rounds of matches
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidEntrantCount` - fewer than 2 entrants
    /// * `TournamentError::DuplicateEntrant` - an entrant listed twice
    /// * `TournamentError::InvalidFormat` - bad match format
    pub fn new(
        name: impl Into<String>,
        format: PoolFormat,
        entrants: Vec<Entrant>,
        rounds: u32,
        match_format: MatchFormat,
    ) -> TournamentResult<Self> {
        if entrants.len() < 2 {
            return Err(TournamentError::InvalidEntrantCount(entrants.len()));
        }
        ensure_unique(&entrants)?;
        match_format.validate()?;

        let matches = schedule_pool(&entrants, format, rounds, match_format);
        Ok(Self {
            name: name.into(),
            format,
            entrants,
            matches,
        })
    }

    /// Create a pool playing the standard number of rounds for its format
    pub fn with_standard_rounds(
        name: impl Into<String>,
        format: PoolFormat,
        entrants: Vec<Entrant>,
        match_format: MatchFormat,
    ) -> TournamentResult<Self> {
        let rounds = rounds_for(format, entrants.len());
        Self::new(name, format, entrants, rounds, match_format)
    }

    /// Record the sets of a match
    ///
    /// Pool matches have no downstream links, so a correction only
    /// replaces the sets.
    pub fn record_score(
        &mut self,
        match_id: MatchId,
        sets: Vec<SetScore>,
    ) -> TournamentResult<MatchOutcome> {
        if sets.is_empty() {
            return Err(TournamentError::IncompleteMatchState(match_id));
        }

        let m = self
            .matches
            .get_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        Ok(m.apply_sets(sets))
    }

    /// Current standing
    pub fn ranking(&self) -> Ranking {
        compute_ranking(&self.entrants, &self.matches)
    }

    /// All matches completed
    pub fn is_complete(&self) -> bool {
        self.matches
            .iter()
            .all(|m| m.status == MatchStatus::Completed)
    }

    /// Number of rounds scheduled
    pub fn rounds(&self) -> u32 {
        self.matches.iter().map(|m| m.round + 1).max().unwrap_or(0)
    }
}
