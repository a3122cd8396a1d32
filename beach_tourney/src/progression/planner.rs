//! Candidate multi-phase plans.
//!
//! A plan is a chain of team sizes, e.g. 4 → 3 → 2: players start in
//! teams of four and are re-teamed into smaller teams as the field
//! shrinks. The last phase is a single round-robin pool of pairs.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::duration::TimingConfig;
use super::models::{
    Configuration, MAX_TEAMS_PER_POOL, MIN_TEAMS_PER_POOL, PoolSpec, ProgressionPhase,
};
use super::partition::{distribute, distribute_qualifiers, pool_matches};
use super::validation::{FINAL_QUALIFIERS, validate_phase_chain};
use crate::errors::{TournamentError, TournamentResult};
use crate::pool::{PoolFormat, rounds_for};

/// Teams in the final phase of a multi-phase plan
pub const FINAL_TEAMS: usize = 4;

/// A plan shape offered for a range of player counts
struct Template {
    name: &'static str,
    chain: &'static [usize],
    min_players: usize,
    max_players: usize,
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "final-pool",
        chain: &[2],
        min_players: 4,
        max_players: 16,
    },
    Template {
        name: "three-two",
        chain: &[3, 2],
        min_players: 12,
        max_players: 72,
    },
    Template {
        name: "four-two",
        chain: &[4, 2],
        min_players: 16,
        max_players: 96,
    },
    Template {
        name: "four-three-two",
        chain: &[4, 3, 2],
        min_players: 32,
        max_players: usize::MAX,
    },
    Template {
        name: "four-four-three-two",
        chain: &[4, 4, 3, 2],
        min_players: 96,
        max_players: usize::MAX,
    },
];

impl Template {
    fn accepts(&self, total_players: usize) -> bool {
        (self.min_players..=self.max_players).contains(&total_players)
            && total_players % self.chain[0] == 0
    }
}

/// Planner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub timing: TimingConfig,
    /// Sets per pool match
    pub sets_per_match: u32,
    /// Target pool size; pool count is `ceil(teams / preferred)`
    pub preferred_teams_per_pool: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            sets_per_match: 1,
            preferred_teams_per_pool: 4,
        }
    }
}

impl PlannerConfig {
    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidFormat` if a value is out of range
    pub fn validate(&self) -> TournamentResult<()> {
        self.timing.validate()?;
        if self.sets_per_match == 0 {
            return Err(TournamentError::InvalidFormat(
                "Sets per match must be at least 1".to_string(),
            ));
        }
        if !(MIN_TEAMS_PER_POOL..=MAX_TEAMS_PER_POOL).contains(&self.preferred_teams_per_pool) {
            return Err(TournamentError::InvalidFormat(format!(
                "Preferred teams per pool must be between {MIN_TEAMS_PER_POOL} and {MAX_TEAMS_PER_POOL}"
            )));
        }
        Ok(())
    }
}

/// Everything needed to lay out one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseShape {
    pub phase_number: u32,
    pub players_per_team: usize,
    pub total_players: usize,
    pub total_qualified: usize,
    pub format: PoolFormat,
    pub pools: usize,
}

impl From<&ProgressionPhase> for PhaseShape {
    fn from(phase: &ProgressionPhase) -> Self {
        Self {
            phase_number: phase.phase_number,
            players_per_team: phase.players_per_team,
            total_players: phase.total_players,
            total_qualified: phase.total_qualified,
            format: phase.format,
            pools: phase.pools.len(),
        }
    }
}

/// Builds progression plans
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidFormat` if the config is invalid
    pub fn new(config: PlannerConfig) -> TournamentResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Every candidate plan suited to `total_players`
    ///
    /// Candidates that cannot be laid out are skipped. Candidates with
    /// validation findings are kept and carry their issues.
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidFieldCount` if `fields` is zero
    pub fn plan(
        &self,
        total_players: usize,
        fields: usize,
    ) -> TournamentResult<Vec<Configuration>> {
        if fields == 0 {
            return Err(TournamentError::InvalidFieldCount(fields));
        }

        let mut candidates = Vec::new();
        for template in TEMPLATES.iter().filter(|t| t.accepts(total_players)) {
            match self.plan_chain(template.name, template.chain, total_players, fields) {
                Ok(configuration) => candidates.push(configuration),
                Err(e) => debug!("Skipping {} for {total_players} players: {e}", template.name),
            }
        }

        info!(
            "Planned {} candidate(s) for {total_players} players on {fields} field(s)",
            candidates.len()
        );
        Ok(candidates)
    }

    /// Lay out a plan for an explicit chain of team sizes
    ///
    /// # Arguments
    ///
    /// * `name` - Label for the plan
    /// * `chain` - Players per team, first phase to last
    /// * `total_players` - Players entering the first phase
    /// * `fields` - Fields available for play
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidFormat` - empty chain
    /// * `TournamentError::InvalidPlayerCount` - players do not split into teams
    /// * `TournamentError::InvalidPoolCount` - a phase cannot be partitioned
    /// * `TournamentError::InvalidFieldCount` - no fields
    pub fn plan_chain(
        &self,
        name: &str,
        chain: &[usize],
        total_players: usize,
        fields: usize,
    ) -> TournamentResult<Configuration> {
        let Some((&final_unit, _)) = chain.split_last() else {
            return Err(TournamentError::InvalidFormat("Phase chain is empty".to_string()));
        };
        let last = chain.len() - 1;
        let final_players = if last == 0 {
            total_players
        } else {
            FINAL_TEAMS * final_unit
        };

        let mut players = total_players;
        let mut phases = Vec::with_capacity(chain.len());
        for (i, &per_team) in chain.iter().enumerate() {
            let is_final = i == last;
            let qualified = if is_final {
                FINAL_QUALIFIERS
            } else if i + 1 == last {
                final_players
            } else {
                let next = chain[i + 1];
                (players / 2 / next * next).max(FINAL_TEAMS * next)
            };

            let teams = players / per_team.max(1);
            let shape = PhaseShape {
                phase_number: i as u32 + 1,
                players_per_team: per_team,
                total_players: players,
                total_qualified: qualified,
                format: if is_final {
                    PoolFormat::RoundRobin
                } else {
                    PoolFormat::KingOfTheBeach
                },
                pools: if is_final {
                    1
                } else {
                    teams.div_ceil(self.config.preferred_teams_per_pool)
                },
            };
            phases.push(self.build_phase(shape, fields)?);
            players = qualified;
        }

        let issues = validate_phase_chain(&phases);
        for issue in &issues {
            debug!("Plan {name}: {issue}");
        }
        Ok(Configuration::new(name, phases, issues))
    }

    /// Partition a phase into pools and estimate its length
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidPlayerCount` - players do not split into teams
    /// * `TournamentError::InvalidPoolCount` - bad pool count for the team count
    /// * `TournamentError::InvalidFieldCount` - no fields
    pub fn build_phase(
        &self,
        shape: PhaseShape,
        fields: usize,
    ) -> TournamentResult<ProgressionPhase> {
        let per_team = shape.players_per_team;
        if per_team == 0 || shape.total_players % per_team != 0 {
            return Err(TournamentError::InvalidPlayerCount {
                players: shape.total_players,
                players_per_team: per_team,
            });
        }
        if fields == 0 {
            return Err(TournamentError::InvalidFieldCount(fields));
        }

        let total_teams = shape.total_players / per_team;
        let sizes = distribute(total_teams, shape.pools)?;
        let pool_players: Vec<usize> = sizes.iter().map(|&teams| teams * per_team).collect();
        let qualified = distribute_qualifiers(shape.total_qualified, &pool_players, per_team);

        let pools: Vec<PoolSpec> = sizes
            .iter()
            .zip(&pool_players)
            .zip(&qualified)
            .enumerate()
            .map(|(index, ((&teams, &players), &qualified))| PoolSpec {
                index,
                teams,
                players,
                qualified,
                rounds: rounds_for(shape.format, teams),
                matches: pool_matches(shape.format, teams),
            })
            .collect();

        let total_matches = pools.iter().map(|pool| pool.matches).sum();
        let sets = self.config.sets_per_match;
        let duration = self.config.timing.phase_duration(total_matches, sets, fields);

        Ok(ProgressionPhase {
            phase_number: shape.phase_number,
            players_per_team: per_team,
            total_players: shape.total_players,
            total_teams,
            format: shape.format,
            pools,
            total_qualified: shape.total_qualified,
            total_matches,
            sets_per_match: sets,
            fields,
            estimated_minutes: duration.num_minutes(),
        })
    }

    /// The same phase split into a different number of pools
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidPoolCount` if the teams cannot be
    /// split into `pools`
    pub fn rebuild_with_pools(
        &self,
        phase: &ProgressionPhase,
        pools: usize,
    ) -> TournamentResult<ProgressionPhase> {
        let shape = PhaseShape {
            pools,
            ..PhaseShape::from(phase)
        };
        self.build_phase(shape, phase.fields)
    }
}

/// Candidate plans for `total_players` with the default planner settings
///
/// # Errors
///
/// Returns `TournamentError::InvalidFieldCount` if `fields` is zero
pub fn plan_progression(
    total_players: usize,
    fields: usize,
) -> TournamentResult<Vec<Configuration>> {
    Planner::default().plan(total_players, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(configurations: &[Configuration]) -> Vec<&str> {
        configurations.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_candidates_by_player_count() {
        let plans = plan_progression(12, 2).expect("plans");
        assert_eq!(names(&plans), vec!["final-pool", "three-two"]);

        let plans = plan_progression(32, 4).expect("plans");
        assert_eq!(names(&plans), vec!["four-two", "four-three-two"]);

        let plans = plan_progression(96, 6).expect("plans");
        assert_eq!(
            names(&plans),
            vec!["four-two", "four-three-two", "four-four-three-two"]
        );

        assert!(plan_progression(3, 2).expect("plans").is_empty());
    }

    #[test]
    fn test_zero_fields_rejected() {
        assert_eq!(
            plan_progression(32, 0),
            Err(TournamentError::InvalidFieldCount(0))
        );
    }

    #[test]
    fn test_four_two_layout() {
        let plans = plan_progression(32, 4).expect("plans");
        let plan = &plans[0];
        assert!(plan.is_valid(), "{:?}", plan.issues);
        assert_eq!(plan.chain(), vec![4, 2]);

        let first = &plan.phases[0];
        assert_eq!(first.format, PoolFormat::KingOfTheBeach);
        assert_eq!(first.pool_distribution(), vec![4, 4]);
        assert_eq!(first.qualifier_distribution(), vec![4, 4]);
        assert_eq!(first.total_matches, 20);
        assert_eq!(first.estimated_minutes, 110);

        let last = plan.final_phase().expect("final phase");
        assert_eq!(last.format, PoolFormat::RoundRobin);
        assert_eq!(last.total_teams, FINAL_TEAMS);
        assert_eq!(last.total_qualified, 2);
        assert_eq!(last.total_matches, 18);

        assert_eq!(plan.total_matches, 38);
        assert_eq!(plan.estimated_minutes, 220);
    }

    #[test]
    fn test_four_three_two_uneven_middle_phase() {
        let plans = plan_progression(32, 4).expect("plans");
        let plan = &plans[1];
        assert!(plan.is_valid(), "{:?}", plan.issues);

        assert_eq!(plan.phases[0].total_qualified, 15);
        assert_eq!(plan.phases[0].qualifier_distribution(), vec![7, 8]);

        let middle = &plan.phases[1];
        assert_eq!(middle.total_teams, 5);
        assert_eq!(middle.pool_distribution(), vec![3, 2]);
        assert_eq!(middle.qualifier_distribution(), vec![5, 3]);
        assert_eq!(plan.phases[2].total_players, 8);
    }

    #[test]
    fn test_single_final_pool() {
        let plans = plan_progression(12, 2).expect("plans");
        let plan = &plans[0];
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].total_teams, 6);
        assert_eq!(plan.phases[0].pool_distribution(), vec![6]);
        assert!(plan.is_valid());
    }

    #[test]
    fn test_king_phase_nine_teams() {
        let planner = Planner::default();
        let phase = planner
            .build_phase(
                PhaseShape {
                    phase_number: 1,
                    players_per_team: 3,
                    total_players: 27,
                    total_qualified: 12,
                    format: PoolFormat::KingOfTheBeach,
                    pools: 3,
                },
                4,
            )
            .expect("valid phase");
        assert_eq!(phase.pool_distribution(), vec![3, 3, 3]);
        assert_eq!(phase.qualifier_distribution(), vec![4, 4, 4]);
        assert!(phase.pools.iter().all(|p| p.qualified <= p.players - 3));
    }

    #[test]
    fn test_rebuild_with_pools() {
        let plans = plan_progression(32, 4).expect("plans");
        let original = &plans[0].phases[0];

        let merged = Planner::default()
            .rebuild_with_pools(original, 1)
            .expect("eight teams fit one pool");
        assert_eq!(merged.pool_distribution(), vec![8]);
        assert_eq!(merged.qualifier_distribution(), vec![8]);
        assert_eq!(merged.total_qualified, original.total_qualified);
        // Original untouched
        assert_eq!(original.pool_distribution(), vec![4, 4]);

        assert_eq!(
            Planner::default().rebuild_with_pools(original, 5),
            Err(TournamentError::InvalidPoolCount { teams: 8, pools: 5 })
        );
    }

    #[test]
    fn test_players_must_split_into_teams() {
        let result = Planner::default().plan_chain("odd", &[3, 2], 10, 2);
        assert_eq!(
            result,
            Err(TournamentError::InvalidPlayerCount {
                players: 10,
                players_per_team: 3
            })
        );
    }

    #[test]
    fn test_invalid_planner_config() {
        let config = PlannerConfig {
            preferred_teams_per_pool: 9,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            Planner::new(config),
            Err(TournamentError::InvalidFormat(_))
        ));
    }
}
