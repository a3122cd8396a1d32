//! Result propagation through the bracket graph.
//!
//! Events are applied to a copy of the bracket. The returned [`Transition`]
//! carries the new bracket plus the IDs of every match it touched, so the
//! caller can persist the source match and all downstream slot writes as a
//! single batch. On error nothing is returned and the original bracket is
//! untouched.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::models::Bracket;
use crate::errors::{TournamentError, TournamentResult};
use crate::matches::{Match, MatchId, MatchStatus, Role, SetScore, Slot, resolve_match};

/// Something that happened to a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEvent {
    /// Play begins (`scheduled` to `in_progress`)
    Start(MatchId),
    /// Sets recorded or corrected
    RecordScore {
        match_id: MatchId,
        sets: Vec<SetScore>,
    },
    /// Score wiped, match back to `scheduled`
    Reopen(MatchId),
}

/// What to do when a change invalidates matches that already started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionPolicy {
    /// Reset every dependent match, transitively
    #[default]
    Cascade,
    /// Refuse the change if a dependent match has started
    RejectIfDownstreamStarted,
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Bracket after the event
    pub bracket: Bracket,
    /// Every match whose record changed, ascending
    pub changed: Vec<MatchId>,
    /// Downstream matches whose score was wiped
    pub reset: Vec<MatchId>,
}

impl Transition {
    /// Changed match records, ready to be written together
    pub fn updates(&self) -> Vec<Match> {
        self.changed
            .iter()
            .map(|&id| self.bracket.matches[id].clone())
            .collect()
    }
}

#[derive(Default)]
struct Changes {
    changed: BTreeSet<MatchId>,
    reset: Vec<MatchId>,
}

impl Bracket {
    /// Apply an event and return the resulting bracket
    ///
    /// # Errors
    ///
    /// * `TournamentError::MatchNotFound` - unknown match or broken link
    /// * `TournamentError::UnresolvedSlot` - an entrant is still pending
    /// * `TournamentError::IncompleteMatchState` - no sets, or a completed
    ///   match re-scored to an undecided result
    /// * `TournamentError::InvalidTransition` - start/reopen from the wrong status
    /// * `TournamentError::DownstreamStarted` - rejected by `policy`
    pub fn apply(
        &self,
        event: MatchEvent,
        policy: CorrectionPolicy,
    ) -> TournamentResult<Transition> {
        let mut next = self.clone();
        let mut changes = Changes::default();

        match event {
            MatchEvent::Start(id) => start(&mut next, id, &mut changes)?,
            MatchEvent::RecordScore { match_id, sets } => {
                record_score(&mut next, match_id, sets, policy, &mut changes)?
            }
            MatchEvent::Reopen(id) => reopen(&mut next, id, policy, &mut changes)?,
        }

        Ok(Transition {
            bracket: next,
            changed: changes.changed.into_iter().collect(),
            reset: changes.reset,
        })
    }
}

fn start(bracket: &mut Bracket, id: MatchId, changes: &mut Changes) -> TournamentResult<()> {
    let m = bracket.get_mut(id)?;
    if !m.is_ready() {
        return Err(TournamentError::UnresolvedSlot(id));
    }
    if m.status != MatchStatus::Scheduled {
        return Err(TournamentError::InvalidTransition {
            match_id: id,
            status: m.status,
        });
    }

    m.status = MatchStatus::InProgress;
    changes.changed.insert(id);
    Ok(())
}

fn record_score(
    bracket: &mut Bracket,
    id: MatchId,
    sets: Vec<SetScore>,
    policy: CorrectionPolicy,
    changes: &mut Changes,
) -> TournamentResult<()> {
    let m = bracket.get(id)?;
    if !m.is_ready() {
        return Err(TournamentError::UnresolvedSlot(id));
    }
    if sets.is_empty() {
        return Err(TournamentError::IncompleteMatchState(id));
    }

    let was_completed = m.status == MatchStatus::Completed;
    let previous = (m.winner, m.loser);
    if was_completed && !resolve_match(&sets, &m.format).is_completed() {
        return Err(TournamentError::IncompleteMatchState(id));
    }

    let m = bracket.get_mut(id)?;
    let outcome = m.apply_sets(sets);
    let current = (m.winner, m.loser);
    changes.changed.insert(id);

    if was_completed && previous != current {
        debug!("Match {id} result changed, invalidating downstream");
        retract_downstream(bracket, id, id, policy, changes)?;
    }
    if outcome.is_completed() {
        propagate(bracket, id, changes)?;
    }
    Ok(())
}

fn reopen(
    bracket: &mut Bracket,
    id: MatchId,
    policy: CorrectionPolicy,
    changes: &mut Changes,
) -> TournamentResult<()> {
    let status = bracket.get(id)?.status;
    match status {
        MatchStatus::Scheduled => {
            return Err(TournamentError::InvalidTransition {
                match_id: id,
                status,
            });
        }
        MatchStatus::Completed => retract_downstream(bracket, id, id, policy, changes)?,
        MatchStatus::InProgress => {}
    }

    bracket.get_mut(id)?.clear_result();
    changes.changed.insert(id);
    Ok(())
}

/// Write a completed match's winner and loser into their destination slots
fn propagate(
    bracket: &mut Bracket,
    source: MatchId,
    changes: &mut Changes,
) -> TournamentResult<()> {
    let m = bracket.get(source)?;
    let writes: Vec<_> = [Role::Winner, Role::Loser]
        .into_iter()
        .filter_map(|role| Some((m.link(role)?, m.result(role)?)))
        .collect();

    for (link, entrant) in writes {
        let destination = bracket.get_mut(link.match_id)?;
        destination.slots[link.side.index()] = Slot::Resolved(entrant);
        changes.changed.insert(link.match_id);
        debug!(
            "Match {source}: entrant {entrant} moves to match {} side {:?}",
            link.match_id, link.side
        );
    }
    Ok(())
}

/// Turn the slots fed by `source` back into placeholders
///
/// Destinations that already started are reset under
/// [`CorrectionPolicy::Cascade`], following their own links in turn.
fn retract_downstream(
    bracket: &mut Bracket,
    origin: MatchId,
    source: MatchId,
    policy: CorrectionPolicy,
    changes: &mut Changes,
) -> TournamentResult<()> {
    let m = bracket.get(source)?;
    let links: Vec<_> = [Role::Winner, Role::Loser]
        .into_iter()
        .filter_map(|role| Some((role, m.link(role)?)))
        .collect();

    for (role, link) in links {
        let destination = bracket.get_mut(link.match_id)?;
        destination.slots[link.side.index()] = Slot::Placeholder { source, role };
        changes.changed.insert(link.match_id);

        if destination.status == MatchStatus::Scheduled {
            continue;
        }
        if policy == CorrectionPolicy::RejectIfDownstreamStarted {
            return Err(TournamentError::DownstreamStarted {
                match_id: origin,
                downstream: link.match_id,
            });
        }

        let was_completed = destination.status == MatchStatus::Completed;
        destination.clear_result();
        changes.reset.push(link.match_id);
        debug!("Match {} reset after change to match {origin}", link.match_id);

        if was_completed {
            retract_downstream(bracket, origin, link.match_id, policy, changes)?;
        }
    }
    Ok(())
}
