//! Progression plan data models.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::validation::PhaseIssue;
use crate::pool::PoolFormat;

/// Smallest pool the planner will produce
pub const MIN_TEAMS_PER_POOL: usize = 2;

/// Largest pool the planner will produce
pub const MAX_TEAMS_PER_POOL: usize = 8;

/// One planned pool of a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    /// 0-based position within the phase
    pub index: usize,
    pub teams: usize,
    pub players: usize,
    /// Players advancing from this pool
    pub qualified: usize,
    pub rounds: u32,
    pub matches: usize,
}

impl PoolSpec {
    /// Players eliminated in this pool
    pub fn eliminated(&self) -> usize {
        self.players.saturating_sub(self.qualified)
    }
}

/// A planned phase of a progressive tournament
///
/// Created by the planner and never edited in place: a different pool
/// count produces a new phase through
/// [`Planner::rebuild_with_pools`](super::Planner::rebuild_with_pools).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPhase {
    /// 1-based phase number
    pub phase_number: u32,
    pub players_per_team: usize,
    pub total_players: usize,
    pub total_teams: usize,
    pub format: PoolFormat,
    pub pools: Vec<PoolSpec>,
    /// Players this phase is asked to advance
    pub total_qualified: usize,
    pub total_matches: usize,
    pub sets_per_match: u32,
    /// Fields the duration estimate assumes
    pub fields: usize,
    pub estimated_minutes: i64,
}

impl ProgressionPhase {
    /// Teams per pool
    pub fn pool_distribution(&self) -> Vec<usize> {
        self.pools.iter().map(|pool| pool.teams).collect()
    }

    /// Qualified players per pool
    pub fn qualifier_distribution(&self) -> Vec<usize> {
        self.pools.iter().map(|pool| pool.qualified).collect()
    }

    /// Qualifiers the pools actually produce
    pub fn allocated_qualifiers(&self) -> usize {
        self.pools.iter().map(|pool| pool.qualified).sum()
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::minutes(self.estimated_minutes)
    }
}

/// A candidate multi-phase plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Template name, e.g. `four-three-two`
    pub name: String,
    pub phases: Vec<ProgressionPhase>,
    /// Validation findings; the plan stays usable
    pub issues: Vec<PhaseIssue>,
    pub total_matches: usize,
    pub estimated_minutes: i64,
}

impl Configuration {
    /// Assemble a plan and total it up
    pub fn new(
        name: impl Into<String>,
        phases: Vec<ProgressionPhase>,
        issues: Vec<PhaseIssue>,
    ) -> Self {
        let total_matches = phases.iter().map(|phase| phase.total_matches).sum();
        let estimated_minutes = phases.iter().map(|phase| phase.estimated_minutes).sum();
        Self {
            name: name.into(),
            phases,
            issues,
            total_matches,
            estimated_minutes,
        }
    }

    /// No validation findings
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Players-per-team values, first phase to last
    pub fn chain(&self) -> Vec<usize> {
        self.phases.iter().map(|phase| phase.players_per_team).collect()
    }

    pub fn final_phase(&self) -> Option<&ProgressionPhase> {
        self.phases.last()
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::minutes(self.estimated_minutes)
    }
}
