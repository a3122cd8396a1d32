//! Duration estimates and phase scheduling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::ProgressionPhase;
use crate::errors::{TournamentError, TournamentResult};

/// Timing assumptions behind every estimate, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub minutes_per_set: u32,
    /// Break between sets of one match
    pub set_break_minutes: u32,
    /// Turnover between matches on a field
    pub match_break_minutes: u32,
    /// Fixed overhead per phase
    pub setup_minutes: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            minutes_per_set: 15,
            set_break_minutes: 2,
            match_break_minutes: 5,
            setup_minutes: 10,
        }
    }
}

impl TimingConfig {
    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidFormat` if a set takes no time
    pub fn validate(&self) -> TournamentResult<()> {
        if self.minutes_per_set == 0 {
            return Err(TournamentError::InvalidFormat(
                "Minutes per set must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// `sets * per_set + (sets - 1) * set_break + match_break`
    pub fn match_duration(&self, sets: u32) -> Duration {
        let minutes = sets * self.minutes_per_set
            + sets.saturating_sub(1) * self.set_break_minutes
            + self.match_break_minutes;
        Duration::minutes(i64::from(minutes))
    }

    /// `ceil(matches / fields) * match_duration + setup`
    ///
    /// A field count of zero is treated as one.
    pub fn phase_duration(&self, total_matches: usize, sets: u32, fields: usize) -> Duration {
        let waves = total_matches.div_ceil(fields.max(1)) as i32;
        self.match_duration(sets) * waves + Duration::minutes(i64::from(self.setup_minutes))
    }
}

/// When a phase runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase_number: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Lay phases end to end from `start`
pub fn schedule(phases: &[ProgressionPhase], start: DateTime<Utc>) -> Vec<PhaseWindow> {
    let mut cursor = start;
    phases
        .iter()
        .map(|phase| {
            let window = PhaseWindow {
                phase_number: phase.phase_number,
                start: cursor,
                end: cursor + phase.estimated_duration(),
            };
            cursor = window.end;
            window
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolFormat;
    use chrono::TimeZone;

    fn phase(phase_number: u32, estimated_minutes: i64) -> ProgressionPhase {
        ProgressionPhase {
            phase_number,
            players_per_team: 2,
            total_players: 8,
            total_teams: 4,
            format: PoolFormat::RoundRobin,
            pools: Vec::new(),
            total_qualified: 2,
            total_matches: 0,
            sets_per_match: 1,
            fields: 1,
            estimated_minutes,
        }
    }

    #[test]
    fn test_match_duration() {
        let timing = TimingConfig::default();
        assert_eq!(timing.match_duration(1), Duration::minutes(20));
        // 3 * 15 + 2 * 2 + 5
        assert_eq!(timing.match_duration(3), Duration::minutes(54));
    }

    #[test]
    fn test_phase_duration_rounds_up_waves() {
        let timing = TimingConfig::default();
        // 10 matches on 4 fields: 3 waves of 20 minutes plus setup
        assert_eq!(timing.phase_duration(10, 1, 4), Duration::minutes(70));
        assert_eq!(timing.phase_duration(8, 1, 4), Duration::minutes(50));
        assert_eq!(timing.phase_duration(0, 1, 4), Duration::minutes(10));
    }

    #[test]
    fn test_zero_minutes_per_set_invalid() {
        let timing = TimingConfig {
            minutes_per_set: 0,
            ..TimingConfig::default()
        };
        assert!(matches!(
            timing.validate(),
            Err(TournamentError::InvalidFormat(_))
        ));
        assert!(TimingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_schedule_back_to_back() {
        let start = Utc.with_ymd_and_hms(2026, 7, 4, 9, 0, 0).unwrap();
        let windows = schedule(&[phase(1, 90), phase(2, 45)], start);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, start);
        assert_eq!(windows[0].end, Utc.with_ymd_and_hms(2026, 7, 4, 10, 30, 0).unwrap());
        assert_eq!(windows[1].start, windows[0].end);
        assert_eq!(windows[1].end, Utc.with_ymd_and_hms(2026, 7, 4, 11, 15, 0).unwrap());
    }
}
