//! Phase-chain validation.
//!
//! Findings are collected rather than raised: a plan with issues is still
//! returned so the caller can decide whether to block it or warn.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::models::ProgressionPhase;

/// Players the final phase must produce
pub const FINAL_QUALIFIERS: usize = 2;

/// A problem found in a progression plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseIssue {
    /// A phase qualifies a different number of players than the next needs
    PhaseChainMismatch {
        phase: u32,
        qualified: usize,
        next_phase: u32,
        required: usize,
    },
    /// The last phase does not end with exactly two players
    FinalQualifiers { phase: u32, qualified: usize },
    /// The pools cannot produce the requested qualifiers
    QualifierShortfall {
        phase: u32,
        requested: usize,
        allocated: usize,
    },
    /// A pool would send every team through
    NoEliminatedTeam { phase: u32, pool: usize },
}

impl fmt::Display for PhaseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseIssue::PhaseChainMismatch {
                phase,
                qualified,
                next_phase,
                required,
            } => write!(
                f,
                "Phase {phase} qualifies {qualified} players but phase {next_phase} needs {required}"
            ),
            PhaseIssue::FinalQualifiers { phase, qualified } => write!(
                f,
                "Final phase {phase} must qualify {FINAL_QUALIFIERS} players, not {qualified}"
            ),
            PhaseIssue::QualifierShortfall {
                phase,
                requested,
                allocated,
            } => write!(
                f,
                "Phase {phase} pools can only qualify {allocated} of {requested} players"
            ),
            PhaseIssue::NoEliminatedTeam { phase, pool } => write!(
                f,
                "Phase {phase} pool {} eliminates no team",
                pool + 1
            ),
        }
    }
}

/// Check a sequence of phases for consistency
///
/// Each phase must qualify exactly the players the next phase seats
/// (`total_teams * players_per_team`), the last phase must qualify
/// [`FINAL_QUALIFIERS`], every pool must eliminate at least one team and
/// the pools must be able to produce the requested qualifiers.
pub fn validate_phase_chain(phases: &[ProgressionPhase]) -> Vec<PhaseIssue> {
    let mut issues = Vec::new();

    for phase in phases {
        let allocated = phase.allocated_qualifiers();
        if allocated < phase.total_qualified {
            issues.push(PhaseIssue::QualifierShortfall {
                phase: phase.phase_number,
                requested: phase.total_qualified,
                allocated,
            });
        }
        for pool in &phase.pools {
            if pool.qualified + phase.players_per_team > pool.players {
                issues.push(PhaseIssue::NoEliminatedTeam {
                    phase: phase.phase_number,
                    pool: pool.index,
                });
            }
        }
    }

    for pair in phases.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let required = next.total_teams * next.players_per_team;
        if current.total_qualified != required {
            issues.push(PhaseIssue::PhaseChainMismatch {
                phase: current.phase_number,
                qualified: current.total_qualified,
                next_phase: next.phase_number,
                required,
            });
        }
    }

    if let Some(last) = phases
        .last()
        .filter(|last| last.total_qualified != FINAL_QUALIFIERS)
    {
        issues.push(PhaseIssue::FinalQualifiers {
            phase: last.phase_number,
            qualified: last.total_qualified,
        });
    }

    issues
}
