//! Match models and outcome resolution.
//!
//! A [`Match`] holds two [`Slot`]s, the recorded [`SetScore`]s and the
//! status derived from them by [`resolve_match`].
//!
//! ## Example
//!
//! ```
//! use beach_tourney::matches::{MatchFormat, MatchStatus, SetScore, Side, resolve_match};
//!
//! let sets = [SetScore::new(21, 17), SetScore::new(23, 21)];
//! let outcome = resolve_match(&sets, &MatchFormat::default());
//!
//! assert_eq!(outcome.status, MatchStatus::Completed);
//! assert_eq!(outcome.winner, Some(Side::A));
//! ```

pub mod models;
pub mod outcome;

pub use models::{
    Entrant, EntrantId, Link, Match, MatchFormat, MatchId, MatchStatus, Role, SetScore, Side, Slot,
};
pub(crate) use models::ensure_unique;
pub use outcome::{MatchOutcome, WIN_MARGIN, resolve_match, resolve_set};
