//! Stored brackets and the manager that updates them.
//!
//! The engine itself is pure; this module is the seam to persistence.
//! [`BracketStore`] commits each event's batch of match records
//! atomically, and [`TournamentManager`] serialises writers per bracket.

pub mod manager;
pub mod store;

pub use manager::TournamentManager;
pub use store::{BracketId, BracketStore, MemoryStore, StoredBracket};
