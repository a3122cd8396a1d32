//! Single-elimination brackets.
//!
//! This module provides:
//! - Bracket construction with byes and a preliminary round
//! - Result propagation along winner and loser links
//! - Score corrections under a [`CorrectionPolicy`]
//! - Final placings and seed lists
//!
//! ## Example
//!
//! ```
//! use beach_tourney::bracket::{BracketConfig, CorrectionPolicy, MatchEvent, build_bracket};
//! use beach_tourney::matches::{Entrant, SetScore, Slot};
//!
//! let entrants: Vec<Entrant> = (1..=3)
//!     .map(|id| Entrant::new(id, format!("Team {id}"), id as u32))
//!     .collect();
//! let bracket = build_bracket(&entrants, &BracketConfig::default()).unwrap();
//!
//! // Seeds 2 and 3 play in, the winner meets seed 1 in the final.
//! let prelim = bracket.preliminary_matches()[0].id;
//! let event = MatchEvent::RecordScore {
//!     match_id: prelim,
//!     sets: vec![SetScore::new(21, 19), SetScore::new(21, 16)],
//! };
//! let transition = bracket.apply(event, CorrectionPolicy::Cascade).unwrap();
//!
//! let final_match = transition.bracket.final_match().unwrap();
//! assert_eq!(final_match.slots[1], Slot::Resolved(2));
//! ```

pub mod builder;
pub mod models;
pub mod propagation;
pub mod seeding;
pub mod standings;

pub use builder::build_bracket;
pub use models::{Bracket, BracketConfig, BracketRound, RoundName};
pub use propagation::{CorrectionPolicy, MatchEvent, Transition};
pub use seeding::{random_draw, seed_from_pools};
pub use standings::{Placement, final_standings};
