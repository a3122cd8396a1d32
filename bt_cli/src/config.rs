//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use beach_tourney::bracket::BracketConfig;
use beach_tourney::matches::MatchFormat;
use beach_tourney::progression::{
    MAX_TEAMS_PER_POOL, MIN_TEAMS_PER_POOL, PlannerConfig, TimingConfig,
};

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Scoring rules for bracket matches
    pub match_format: MatchFormat,
    /// Whether brackets get a third-place match
    pub third_place_match: bool,
    /// Timing, sets per pool match and preferred pool size
    pub planner: PlannerConfig,
    /// Fields available for play
    pub fields: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `fields_override` - Optional field count override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<AppConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(fields_override: Option<usize>) -> Result<Self, ConfigError> {
        let match_format = MatchFormat {
            sets_to_win: parse_env_or("BT_SETS_TO_WIN", 2)?,
            points_per_set: parse_env_or("BT_POINTS_PER_SET", 21)?,
            tie_break_enabled: parse_env_or("BT_TIE_BREAK", true)?,
            tie_break_points: parse_env_or("BT_TIE_BREAK_POINTS", 15)?,
        };

        let timing = TimingConfig {
            minutes_per_set: parse_env_or("BT_MINUTES_PER_SET", 15)?,
            set_break_minutes: parse_env_or("BT_SET_BREAK_MINUTES", 2)?,
            match_break_minutes: parse_env_or("BT_MATCH_BREAK_MINUTES", 5)?,
            setup_minutes: parse_env_or("BT_SETUP_MINUTES", 10)?,
        };

        let planner = PlannerConfig {
            timing,
            sets_per_match: parse_env_or("BT_SETS_PER_MATCH", 1)?,
            preferred_teams_per_pool: parse_env_or("BT_TEAMS_PER_POOL", 4)?,
        };

        let fields = match fields_override {
            Some(fields) => fields,
            None => parse_env_or("BT_FIELDS", 4)?,
        };

        Ok(AppConfig {
            match_format,
            third_place_match: parse_env_or("BT_THIRD_PLACE", true)?,
            planner,
            fields,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fields == 0 {
            return Err(ConfigError::Invalid {
                var: "BT_FIELDS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.planner.sets_per_match == 0 {
            return Err(ConfigError::Invalid {
                var: "BT_SETS_PER_MATCH".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let per_pool = self.planner.preferred_teams_per_pool;
        if !(MIN_TEAMS_PER_POOL..=MAX_TEAMS_PER_POOL).contains(&per_pool) {
            return Err(ConfigError::Invalid {
                var: "BT_TEAMS_PER_POOL".to_string(),
                reason: format!("Must be between {MIN_TEAMS_PER_POOL} and {MAX_TEAMS_PER_POOL}"),
            });
        }

        if self.planner.timing.minutes_per_set == 0 {
            return Err(ConfigError::Invalid {
                var: "BT_MINUTES_PER_SET".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.match_format
            .validate()
            .map_err(|e| ConfigError::Invalid {
                var: "BT_SETS_TO_WIN/BT_POINTS_PER_SET/BT_TIE_BREAK_POINTS".to_string(),
                reason: e.to_string(),
            })
    }

    /// Bracket settings derived from this configuration
    pub fn bracket_config(&self) -> BracketConfig {
        BracketConfig {
            format: self.match_format,
            third_place_match: self.third_place_match,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
///
/// Unset variables take the default; set but unparsable ones are an error.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse {value:?}"),
        }),
        Err(_) => Ok(default),
    }
}
