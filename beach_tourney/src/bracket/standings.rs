//! Final placings read off a bracket.

use serde::{Deserialize, Serialize};

use super::models::{Bracket, RoundName};
use crate::matches::{EntrantId, MatchStatus};

/// An entrant's finishing place
///
/// Entrants eliminated in the same round share a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub place: u32,
    pub entrant: EntrantId,
}

/// Placings decided so far, best first
///
/// The final decides first and second. The third-place match decides
/// third and fourth; without one both semifinal losers share third.
/// Losers of every earlier round share the place after the entrants that
/// survived it. Undecided matches contribute nothing.
pub fn final_standings(bracket: &Bracket) -> Vec<Placement> {
    let mut placements = Vec::new();
    let has_third_place = bracket.third_place_match().is_some();

    for round in &bracket.rounds {
        let decided = round
            .matches
            .iter()
            .map(|&id| &bracket.matches[id])
            .filter(|m| m.status == MatchStatus::Completed);

        for m in decided {
            let (Some(winner), Some(loser)) = (m.winner, m.loser) else {
                continue;
            };
            match round.name {
                RoundName::Final => {
                    placements.push(Placement {
                        place: 1,
                        entrant: winner,
                    });
                    placements.push(Placement {
                        place: 2,
                        entrant: loser,
                    });
                }
                RoundName::ThirdPlace => {
                    placements.push(Placement {
                        place: 3,
                        entrant: winner,
                    });
                    placements.push(Placement {
                        place: 4,
                        entrant: loser,
                    });
                }
                RoundName::Semifinal if has_third_place => {}
                RoundName::Preliminary => placements.push(Placement {
                    place: (bracket.total_slots / 2 + 1) as u32,
                    entrant: loser,
                }),
                _ => placements.push(Placement {
                    place: (round.matches.len() + 1) as u32,
                    entrant: loser,
                }),
            }
        }
    }

    let seed_index = |id: EntrantId| {
        bracket
            .entrants
            .iter()
            .position(|entrant| entrant.id == id)
            .unwrap_or(usize::MAX)
    };
    placements.sort_by_key(|p| (p.place, seed_index(p.entrant)));
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{BracketConfig, CorrectionPolicy, MatchEvent, build_bracket};
    use crate::matches::{Entrant, MatchFormat, SetScore};

    fn single_set_bracket(n: usize, third_place_match: bool) -> Bracket {
        let entrants: Vec<Entrant> = (0..n)
            .map(|i| Entrant::new(i as i64 + 1, format!("Team {}", i + 1), i as u32 + 1))
            .collect();
        let config = BracketConfig {
            format: MatchFormat::single_set(21),
            third_place_match,
        };
        build_bracket(&entrants, &config).expect("valid bracket")
    }

    /// Play every match in id order, higher seed (side A) winning
    fn play_out(mut bracket: Bracket) -> Bracket {
        for id in 0..bracket.matches.len() {
            let event = MatchEvent::RecordScore {
                match_id: id,
                sets: vec![SetScore::new(21, 15)],
            };
            bracket = bracket
                .apply(event, CorrectionPolicy::Cascade)
                .expect("playable")
                .bracket;
        }
        bracket
    }

    #[test]
    fn test_empty_before_play() {
        let bracket = single_set_bracket(8, true);
        assert!(final_standings(&bracket).is_empty());
    }

    #[test]
    fn test_four_with_third_place() {
        let bracket = play_out(single_set_bracket(4, true));
        let placings: Vec<(u32, EntrantId)> = final_standings(&bracket)
            .iter()
            .map(|p| (p.place, p.entrant))
            .collect();
        assert_eq!(placings, vec![(1, 1), (2, 2), (3, 4), (4, 3)]);
    }

    #[test]
    fn test_shared_third_without_third_place_match() {
        let bracket = play_out(single_set_bracket(4, false));
        let placings: Vec<(u32, EntrantId)> = final_standings(&bracket)
            .iter()
            .map(|p| (p.place, p.entrant))
            .collect();
        assert_eq!(placings, vec![(1, 1), (2, 2), (3, 3), (3, 4)]);
    }

    #[test]
    fn test_twelve_entrants_shared_places() {
        let bracket = play_out(single_set_bracket(12, true));
        let standings = final_standings(&bracket);
        assert_eq!(standings.len(), 12);

        let at = |place: u32| -> Vec<EntrantId> {
            standings
                .iter()
                .filter(|p| p.place == place)
                .map(|p| p.entrant)
                .collect()
        };
        assert_eq!(at(1), vec![1]);
        assert_eq!(at(5), vec![5, 6, 7, 8]);
        assert_eq!(at(9), vec![9, 10, 11, 12]);
    }
}
