//! Multi-phase progression planning.
//!
//! This module provides:
//! - Balanced pool partitions and per-pool match counts
//! - Proportional qualifier allocation across pools
//! - Phase-chain validation with collected, non-fatal findings
//! - Duration estimates and back-to-back phase schedules
//! - Candidate plans chosen by player count
//!
//! ## Example
//!
//! ```
//! use beach_tourney::progression::{distribute, plan_progression};
//!
//! assert_eq!(distribute(10, 3).unwrap(), vec![4, 3, 3]);
//!
//! let plans = plan_progression(32, 4).unwrap();
//! for plan in &plans {
//!     assert_eq!(plan.final_phase().unwrap().total_qualified, 2);
//! }
//! ```

pub mod duration;
pub mod models;
pub mod partition;
pub mod planner;
pub mod validation;

pub use duration::{PhaseWindow, TimingConfig, schedule};
pub use models::{Configuration, MAX_TEAMS_PER_POOL, MIN_TEAMS_PER_POOL, PoolSpec, ProgressionPhase};
pub use partition::{distribute, distribute_qualifiers, pool_matches, total_matches};
pub use planner::{FINAL_TEAMS, PhaseShape, Planner, PlannerConfig, plan_progression};
pub use validation::{FINAL_QUALIFIERS, PhaseIssue, validate_phase_chain};
