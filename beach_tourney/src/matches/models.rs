//! Entrant, set and match data models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::{MatchOutcome, resolve_match};
use crate::errors::{TournamentError, TournamentResult};

/// Entrant ID type
pub type EntrantId = i64;

/// Match ID type (index into the owning bracket or pool)
pub type MatchId = usize;

/// A competitor unit (team or player group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    /// Entrant ID
    pub id: EntrantId,
    /// Display name
    pub name: String,
    /// Seed rank (1 is the strongest)
    pub seed: u32,
}

impl Entrant {
    /// Create a new entrant
    pub fn new(id: EntrantId, name: impl Into<String>, seed: u32) -> Self {
        Self {
            id,
            name: name.into(),
            seed,
        }
    }
}

/// Reject entrant lists that name the same entrant twice
pub(crate) fn ensure_unique(entrants: &[Entrant]) -> TournamentResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(entrants.len());
    for entrant in entrants {
        if !seen.insert(entrant.id) {
            return Err(TournamentError::DuplicateEntrant(entrant.id));
        }
    }
    Ok(())
}

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Slot index of this side
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    /// The other side
    pub const fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Which result of a source match feeds a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Winner,
    Loser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Winner => write!(f, "winner"),
            Role::Loser => write!(f, "loser"),
        }
    }
}

/// Score of a single set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub const fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Points scored by one side
    pub const fn points(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

/// Match status, only moving forward unless explicitly reopened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Scoring rules for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFormat {
    /// Sets needed to win the match
    pub sets_to_win: u32,
    /// Points needed to win a regular set
    pub points_per_set: u32,
    /// Whether the deciding set is shortened
    pub tie_break_enabled: bool,
    /// Points needed to win the deciding set when tie-break is enabled
    pub tie_break_points: u32,
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self {
            sets_to_win: 2,
            points_per_set: 21,
            tie_break_enabled: true,
            tie_break_points: 15,
        }
    }
}

impl MatchFormat {
    /// One set to the given number of points
    pub fn single_set(points_per_set: u32) -> Self {
        Self {
            sets_to_win: 1,
            points_per_set,
            tie_break_enabled: false,
            tie_break_points: points_per_set,
        }
    }

    /// Maximum number of sets a match can last
    pub fn max_sets(&self) -> usize {
        (2 * self.sets_to_win as usize).saturating_sub(1)
    }

    /// Points needed to win the set at `index` (0-based)
    pub fn points_for_set(&self, index: usize) -> u32 {
        if self.tie_break_enabled && self.sets_to_win > 1 && index + 1 == self.max_sets() {
            self.tie_break_points
        } else {
            self.points_per_set
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.sets_to_win == 0 {
            return Err(TournamentError::InvalidFormat(
                "Sets to win must be at least 1".to_string(),
            ));
        }

        if self.points_per_set == 0 {
            return Err(TournamentError::InvalidFormat(
                "Points per set must be at least 1".to_string(),
            ));
        }

        if self.tie_break_enabled && self.tie_break_points == 0 {
            return Err(TournamentError::InvalidFormat(
                "Tie-break points must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// A match participant: either a known entrant or a pending result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Entrant is known
    Resolved(EntrantId),
    /// Waits for the winner or loser of another match
    Placeholder { source: MatchId, role: Role },
}

impl Slot {
    /// Entrant in this slot, if resolved
    pub const fn entrant(&self) -> Option<EntrantId> {
        match self {
            Slot::Resolved(id) => Some(*id),
            Slot::Placeholder { .. } => None,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Slot::Resolved(_))
    }
}

/// Forward edge from a match result to a slot of another match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub match_id: MatchId,
    pub side: Side,
}

/// A match between two slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID
    pub id: MatchId,
    /// Round index (0-based)
    pub round: u32,
    /// Participants, side A then side B
    pub slots: [Slot; 2],
    /// Recorded sets
    pub sets: Vec<SetScore>,
    /// Current status
    pub status: MatchStatus,
    /// Winning entrant once completed
    pub winner: Option<EntrantId>,
    /// Losing entrant once completed
    pub loser: Option<EntrantId>,
    /// Scoring rules
    pub format: MatchFormat,
    /// Where the winner goes next
    pub winner_to: Option<Link>,
    /// Where the loser goes next
    pub loser_to: Option<Link>,
}

impl Match {
    /// Create a scheduled match without forward links
    pub fn new(id: MatchId, round: u32, a: Slot, b: Slot, format: MatchFormat) -> Self {
        Self {
            id,
            round,
            slots: [a, b],
            sets: Vec::new(),
            status: MatchStatus::Scheduled,
            winner: None,
            loser: None,
            format,
            winner_to: None,
            loser_to: None,
        }
    }

    pub fn slot(&self, side: Side) -> &Slot {
        &self.slots[side.index()]
    }

    /// Entrant on one side, if resolved
    pub fn entrant(&self, side: Side) -> Option<EntrantId> {
        self.slot(side).entrant()
    }

    /// Both participants are known
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(Slot::is_resolved)
    }

    /// Side the entrant plays on
    pub fn side_of(&self, entrant: EntrantId) -> Option<Side> {
        [Side::A, Side::B]
            .into_iter()
            .find(|side| self.entrant(*side) == Some(entrant))
    }

    /// Forward link for a result role
    pub fn link(&self, role: Role) -> Option<Link> {
        match role {
            Role::Winner => self.winner_to,
            Role::Loser => self.loser_to,
        }
    }

    /// Outcome of the recorded sets
    pub fn outcome(&self) -> MatchOutcome {
        resolve_match(&self.sets, &self.format)
    }

    /// Entrant holding a result role, once completed
    pub fn result(&self, role: Role) -> Option<EntrantId> {
        match role {
            Role::Winner => self.winner,
            Role::Loser => self.loser,
        }
    }

    /// Store sets and the status/result derived from them
    pub(crate) fn apply_sets(&mut self, sets: Vec<SetScore>) -> MatchOutcome {
        self.sets = sets;
        let outcome = self.outcome();
        self.status = outcome.status;
        self.winner = outcome.winner.and_then(|side| self.entrant(side));
        self.loser = outcome.loser.and_then(|side| self.entrant(side));
        outcome
    }

    /// Back to scheduled with no score
    pub(crate) fn clear_result(&mut self) {
        self.sets.clear();
        self.status = MatchStatus::Scheduled;
        self.winner = None;
        self.loser = None;
    }
}
