//! # Beach Tourney
//!
//! A tournament progression engine for beach volleyball events: pools,
//! single-elimination brackets and multi-phase "King" formats where
//! players are re-teamed into smaller teams as the field shrinks.
//!
//! ## Architecture
//!
//! The engine is a set of pure functions over explicit snapshots. Each
//! layer builds on the one before:
//!
//! - **Match outcome**: set scores to sets won, status, winner and loser
//! - **Pool ranking**: standings recomputed from completed matches
//! - **Bracket topology**: byes, preliminary round, main rounds and the
//!   third-place match, linked by winner and loser edges
//! - **Propagation**: match events applied to a bracket, producing the
//!   batch of records to persist together
//! - **Progression planning**: pool partitions, qualifier allocation,
//!   phase-chain validation and duration estimates
//!
//! ## Core Modules
//!
//! - [`matches`]: Entrants, set scores, matches and the outcome resolver
//! - [`pool`]: Pool schedules and rankings
//! - [`bracket`]: Bracket construction, propagation, standings and seeding
//! - [`progression`]: Multi-phase planning
//! - [`tournament`]: Bracket storage and the manager that serialises writes
//!
//! ## Example
//!
//! ```
//! use beach_tourney::{BracketConfig, Entrant, RoundName, build_bracket};
//!
//! let entrants: Vec<Entrant> = (1..=12)
//!     .map(|id| Entrant::new(id, format!("Team {id}"), id as u32))
//!     .collect();
//! let bracket = build_bracket(&entrants, &BracketConfig::default()).unwrap();
//!
//! assert_eq!(bracket.byes, 4);
//! assert_eq!(bracket.preliminary_matches().len(), 4);
//! assert_eq!(bracket.round_matches(RoundName::Quarterfinal).len(), 4);
//! ```

/// Error types shared across the engine.
pub mod errors;
pub use errors::{TournamentError, TournamentResult};

/// Match models and outcome resolution.
pub mod matches;
pub use matches::{
    Entrant, EntrantId, Match, MatchFormat, MatchId, MatchStatus, SetScore, Slot, resolve_match,
    resolve_set,
};

/// Pool schedules and rankings.
pub mod pool;
pub use pool::{Pool, PoolFormat, Ranking, compute_ranking};

/// Single-elimination brackets.
pub mod bracket;
pub use bracket::{
    Bracket, BracketConfig, CorrectionPolicy, MatchEvent, RoundName, Transition, build_bracket,
    final_standings,
};

/// Multi-phase progression planning.
pub mod progression;
pub use progression::{
    Configuration, PhaseIssue, Planner, PlannerConfig, ProgressionPhase, distribute,
    plan_progression, validate_phase_chain,
};

/// Bracket storage and management.
pub mod tournament;
pub use tournament::{BracketId, BracketStore, MemoryStore, TournamentManager};
