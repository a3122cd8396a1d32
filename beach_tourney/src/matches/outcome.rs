//! Set and match outcome resolution.
//!
//! Pure functions: the same scores always give the same outcome, so they can
//! be re-run after any score correction.

use serde::{Deserialize, Serialize};

use super::models::{MatchFormat, MatchStatus, SetScore, Side};

/// Margin a side must lead by to take a set
pub const WIN_MARGIN: u32 = 2;

/// Result of tallying a match's sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub sets_won_a: u32,
    pub sets_won_b: u32,
    pub status: MatchStatus,
    pub winner: Option<Side>,
    pub loser: Option<Side>,
}

impl MatchOutcome {
    /// Sets won by one side
    pub const fn sets_won(&self, side: Side) -> u32 {
        match side {
            Side::A => self.sets_won_a,
            Side::B => self.sets_won_b,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Winner of a set, or `None` while undecided
///
/// A side takes the set once it reaches `points_to_win` and leads by two.
pub fn resolve_set(score: SetScore, points_to_win: u32) -> Option<Side> {
    if score.a >= points_to_win && score.a.saturating_sub(score.b) >= WIN_MARGIN {
        Some(Side::A)
    } else if score.b >= points_to_win && score.b.saturating_sub(score.a) >= WIN_MARGIN {
        Some(Side::B)
    } else {
        None
    }
}

/// Tally sets into a match outcome
///
/// Completed once a side reaches `sets_to_win`, or once every possible set
/// was recorded and the tally is not tied (an undecided deciding set keeps
/// the match open).
pub fn resolve_match(sets: &[SetScore], format: &MatchFormat) -> MatchOutcome {
    let (mut won_a, mut won_b) = (0, 0);
    for (index, set) in sets.iter().enumerate() {
        match resolve_set(*set, format.points_for_set(index)) {
            Some(Side::A) => won_a += 1,
            Some(Side::B) => won_b += 1,
            None => {}
        }
    }

    let decided = won_a >= format.sets_to_win
        || won_b >= format.sets_to_win
        || (sets.len() == format.max_sets() && won_a != won_b);

    let (status, winner) = if decided {
        let winner = if won_a > won_b { Side::A } else { Side::B };
        (MatchStatus::Completed, Some(winner))
    } else if sets.is_empty() {
        (MatchStatus::Scheduled, None)
    } else {
        (MatchStatus::InProgress, None)
    };

    MatchOutcome {
        sets_won_a: won_a,
        sets_won_b: won_b,
        status,
        winner,
        loser: winner.map(Side::opposite),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_of_three() -> MatchFormat {
        MatchFormat {
            tie_break_enabled: false,
            ..MatchFormat::default()
        }
    }

    #[test]
    fn test_resolve_set_requires_two_point_lead() {
        assert_eq!(resolve_set(SetScore::new(21, 19), 21), Some(Side::A));
        assert_eq!(resolve_set(SetScore::new(21, 20), 21), None);
        assert_eq!(resolve_set(SetScore::new(24, 26), 21), Some(Side::B));
        assert_eq!(resolve_set(SetScore::new(18, 12), 21), None);
        assert_eq!(resolve_set(SetScore::new(0, 0), 21), None);
    }

    #[test]
    fn test_resolve_set_extreme_scores() {
        assert_eq!(resolve_set(SetScore::new(u32::MAX, u32::MAX), 21), None);
        assert_eq!(resolve_set(SetScore::new(u32::MAX, 0), 21), Some(Side::A));
        assert_eq!(resolve_set(SetScore::new(u32::MAX - 1, u32::MAX), 21), None);
        assert_eq!(resolve_set(SetScore::new(0, u32::MAX), 21), Some(Side::B));
    }

    #[test]
    fn test_straight_sets_win() {
        let sets = [SetScore::new(21, 15), SetScore::new(21, 18)];
        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::Completed);
        assert_eq!(outcome.winner, Some(Side::A));
        assert_eq!(outcome.loser, Some(Side::B));
        assert_eq!(outcome.sets_won(Side::A), 2);
        assert_eq!(outcome.sets_won(Side::B), 0);
    }

    #[test]
    fn test_split_sets_in_progress() {
        let sets = [SetScore::new(21, 15), SetScore::new(17, 21)];
        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::InProgress);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.loser, None);
    }

    #[test]
    fn test_undecided_deciding_set_keeps_match_open() {
        let sets = [
            SetScore::new(21, 15),
            SetScore::new(17, 21),
            SetScore::new(10, 9),
        ];
        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::InProgress);
    }

    #[test]
    fn test_all_sets_played_with_undecided_set_but_clear_lead() {
        // Second set abandoned undecided, third won: 2-0 after max sets.
        let sets = [
            SetScore::new(21, 15),
            SetScore::new(20, 20),
            SetScore::new(21, 11),
        ];
        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::Completed);
        assert_eq!(outcome.winner, Some(Side::A));

        let sets = [
            SetScore::new(21, 15),
            SetScore::new(20, 20),
            SetScore::new(5, 3),
        ];
        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::Completed);
        assert_eq!(outcome.sets_won_a, 1);
        assert_eq!(outcome.sets_won_b, 0);
    }

    #[test]
    fn test_no_sets_is_scheduled() {
        let outcome = resolve_match(&[], &MatchFormat::default());
        assert_eq!(outcome.status, MatchStatus::Scheduled);
        assert_eq!(outcome.sets_won_a, 0);
    }

    #[test]
    fn test_tie_break_set_played_to_fifteen() {
        let format = MatchFormat::default();
        let sets = [
            SetScore::new(21, 15),
            SetScore::new(17, 21),
            SetScore::new(15, 12),
        ];
        let outcome = resolve_match(&sets, &format);
        assert_eq!(outcome.status, MatchStatus::Completed);
        assert_eq!(outcome.winner, Some(Side::A));

        let outcome = resolve_match(&sets, &best_of_three());
        assert_eq!(outcome.status, MatchStatus::InProgress);
    }

    #[test]
    fn test_resolve_match_is_idempotent() {
        let sets = [SetScore::new(19, 21), SetScore::new(22, 24)];
        let format = MatchFormat::default();
        assert_eq!(resolve_match(&sets, &format), resolve_match(&sets, &format));
    }
}
