//! Error types shared by the bracket, pool and progression modules.

use thiserror::Error;

use crate::matches::{EntrantId, MatchId, MatchStatus};
use crate::tournament::BracketId;

/// Tournament engine errors
///
/// Structural errors abort the operation before anything is produced.
/// Validation findings on progression plans are not errors; see
/// [`crate::progression::PhaseIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// A bracket needs at least two entrants
    #[error("Invalid entrant count: need at least 2, got {0}")]
    InvalidEntrantCount(usize),

    /// The same entrant appears twice in a seed list
    #[error("Duplicate entrant: {0}")]
    DuplicateEntrant(EntrantId),

    /// Pool count outside `[1, teams]` or producing out-of-range pool sizes
    #[error("Invalid pool count: cannot split {teams} teams into {pools} pools")]
    InvalidPoolCount { teams: usize, pools: usize },

    /// Score absent or not enough to decide the match
    #[error("Incomplete match state for match {0}")]
    IncompleteMatchState(MatchId),

    /// Referenced match does not exist
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Match still waits on another match's result
    #[error("Match {0} still has a placeholder slot")]
    UnresolvedSlot(MatchId),

    /// Event not allowed from the match's current status
    #[error("Invalid transition for match {match_id} from {status}")]
    InvalidTransition {
        match_id: MatchId,
        status: MatchStatus,
    },

    /// Correction rejected because a dependent match already has a score
    #[error("Match {match_id} cannot change: downstream match {downstream} already started")]
    DownstreamStarted {
        match_id: MatchId,
        downstream: MatchId,
    },

    /// Match format settings are inconsistent
    #[error("Invalid match format: {0}")]
    InvalidFormat(String),

    /// Planning needs at least one playing field
    #[error("Invalid field count: {0}")]
    InvalidFieldCount(usize),

    /// Players cannot be grouped into whole teams
    #[error("Invalid player count: {players} players cannot form teams of {players_per_team}")]
    InvalidPlayerCount {
        players: usize,
        players_per_team: usize,
    },

    /// Stored bracket does not exist
    #[error("Bracket not found: {0}")]
    BracketNotFound(BracketId),

    /// Batch written against an outdated snapshot
    #[error("Revision conflict on bracket {id}: expected {expected}, found {actual}")]
    RevisionConflict {
        id: BracketId,
        expected: u64,
        actual: u64,
    },
}

pub type TournamentResult<T> = Result<T, TournamentError>;
