//! Tournament manager: applies match events to stored brackets.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::store::{BracketId, BracketStore, StoredBracket};
use crate::bracket::{
    BracketConfig, CorrectionPolicy, MatchEvent, Placement, build_bracket, final_standings,
};
use crate::errors::TournamentResult;
use crate::matches::{Entrant, MatchId, SetScore};

/// Tournament manager
///
/// Every event loads a snapshot, applies it as a pure transition and
/// commits the changed matches as one batch. Writers to the same bracket
/// are serialised; different brackets proceed independently.
#[derive(Clone)]
pub struct TournamentManager {
    store: Arc<dyn BracketStore>,
    policy: CorrectionPolicy,
    locks: Arc<Mutex<HashMap<BracketId, Arc<Mutex<()>>>>>,
}

impl TournamentManager {
    /// Create a new tournament manager
    ///
    /// # Arguments
    ///
    /// * `store` - Bracket storage
    /// * `policy` - How score corrections treat started downstream matches
    pub fn new(store: Arc<dyn BracketStore>, policy: CorrectionPolicy) -> Self {
        Self {
            store,
            policy,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn policy(&self) -> CorrectionPolicy {
        self.policy
    }

    /// Build and store a bracket
    ///
    /// # Arguments
    ///
    /// * `entrants` - Entrants in seed order
    /// * `config` - Match format and third-place setting
    ///
    /// # Returns
    ///
    /// * `TournamentResult<StoredBracket>` - The stored bracket at revision 0
    pub async fn create_bracket(
        &self,
        entrants: &[Entrant],
        config: &BracketConfig,
    ) -> TournamentResult<StoredBracket> {
        let bracket = build_bracket(entrants, config)?;
        let stored = self.store.insert(bracket).await?;
        info!(
            "Created bracket {} with {} entrants and {} matches",
            stored.id,
            entrants.len(),
            stored.bracket.matches.len()
        );
        Ok(stored)
    }

    pub async fn get_bracket(&self, id: BracketId) -> TournamentResult<StoredBracket> {
        self.store.load(id).await
    }

    /// Mark a match as in progress
    pub async fn start_match(
        &self,
        id: BracketId,
        match_id: MatchId,
    ) -> TournamentResult<StoredBracket> {
        self.apply(id, MatchEvent::Start(match_id)).await
    }

    /// Record or correct a match score
    ///
    /// A completed result moves the winner and loser into their next
    /// matches in the same commit.
    pub async fn submit_score(
        &self,
        id: BracketId,
        match_id: MatchId,
        sets: Vec<SetScore>,
    ) -> TournamentResult<StoredBracket> {
        self.apply(id, MatchEvent::RecordScore { match_id, sets })
            .await
    }

    /// Wipe a match's score and send it back to scheduled
    pub async fn reopen_match(
        &self,
        id: BracketId,
        match_id: MatchId,
    ) -> TournamentResult<StoredBracket> {
        self.apply(id, MatchEvent::Reopen(match_id)).await
    }

    /// Placings decided so far
    pub async fn standings(&self, id: BracketId) -> TournamentResult<Vec<Placement>> {
        let stored = self.store.load(id).await?;
        Ok(final_standings(&stored.bracket))
    }

    async fn apply(&self, id: BracketId, event: MatchEvent) -> TournamentResult<StoredBracket> {
        let lock = self.bracket_lock(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_locked(id, event).await
        };
        self.release_lock(id, lock).await;
        result
    }

    async fn apply_locked(
        &self,
        id: BracketId,
        event: MatchEvent,
    ) -> TournamentResult<StoredBracket> {
        let stored = self.store.load(id).await?;
        let transition = stored.bracket.apply(event, self.policy)?;
        if !transition.reset.is_empty() {
            warn!(
                "Bracket {id}: correction reset downstream matches {:?}",
                transition.reset
            );
        }

        let committed = self
            .store
            .commit(id, stored.revision, transition.updates())
            .await?;
        info!(
            "Bracket {id} at revision {}: updated matches {:?}",
            committed.revision, transition.changed
        );
        Ok(committed)
    }

    async fn bracket_lock(&self, id: BracketId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_default().clone()
    }

    /// Drop the bracket's lock entry once no other writer holds it
    async fn release_lock(&self, id: BracketId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks.get(&id).is_some_and(|entry| Arc::strong_count(entry) == 1) {
            locks.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TournamentError;
    use crate::matches::{MatchFormat, MatchStatus, Slot};
    use crate::tournament::MemoryStore;

    fn entrants(n: i64) -> Vec<Entrant> {
        (1..=n)
            .map(|id| Entrant::new(id, format!("Team {id}"), id as u32))
            .collect()
    }

    fn single_set() -> BracketConfig {
        BracketConfig {
            format: MatchFormat::single_set(21),
            third_place_match: true,
        }
    }

    fn manager(policy: CorrectionPolicy) -> TournamentManager {
        TournamentManager::new(Arc::new(MemoryStore::new()), policy)
    }

    #[tokio::test]
    async fn test_score_propagates_in_one_commit() {
        let manager = manager(CorrectionPolicy::Cascade);
        let stored = manager
            .create_bracket(&entrants(4), &single_set())
            .await
            .expect("create");

        let committed = manager
            .submit_score(stored.id, 0, vec![SetScore::new(21, 12)])
            .await
            .expect("score");

        assert_eq!(committed.revision, 1);
        let bracket = &committed.bracket;
        assert_eq!(bracket.matches[0].status, MatchStatus::Completed);
        let final_match = bracket.final_match().expect("final");
        assert_eq!(final_match.slots[0], Slot::Resolved(1));
        let third = bracket.third_place_match().expect("third place");
        assert_eq!(third.slots[0], Slot::Resolved(4));
    }

    #[tokio::test]
    async fn test_failed_event_leaves_store_untouched() {
        let manager = manager(CorrectionPolicy::Cascade);
        let stored = manager
            .create_bracket(&entrants(4), &single_set())
            .await
            .expect("create");
        let final_id = stored.bracket.final_match().expect("final").id;

        let result = manager
            .submit_score(stored.id, final_id, vec![SetScore::new(21, 10)])
            .await;
        assert_eq!(result, Err(TournamentError::UnresolvedSlot(final_id)));

        let loaded = manager.get_bracket(stored.id).await.expect("load");
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_reject_policy_blocks_correction() {
        let manager = manager(CorrectionPolicy::RejectIfDownstreamStarted);
        let stored = manager
            .create_bracket(&entrants(4), &single_set())
            .await
            .expect("create");
        let id = stored.id;
        let final_id = stored.bracket.final_match().expect("final").id;

        manager
            .submit_score(id, 0, vec![SetScore::new(21, 12)])
            .await
            .expect("semi 1");
        manager
            .submit_score(id, 1, vec![SetScore::new(21, 19)])
            .await
            .expect("semi 2");
        manager.start_match(id, final_id).await.expect("start final");

        let result = manager
            .submit_score(id, 0, vec![SetScore::new(12, 21)])
            .await;
        assert_eq!(
            result,
            Err(TournamentError::DownstreamStarted {
                match_id: 0,
                downstream: final_id,
            })
        );
    }

    #[tokio::test]
    async fn test_standings_after_final() {
        let manager = manager(CorrectionPolicy::Cascade);
        let stored = manager
            .create_bracket(&entrants(2), &single_set())
            .await
            .expect("create");

        manager
            .submit_score(stored.id, 0, vec![SetScore::new(19, 21)])
            .await
            .expect("final");

        let standings = manager.standings(stored.id).await.expect("standings");
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].entrant, 2);
        assert_eq!(standings[0].place, 1);
    }

    #[tokio::test]
    async fn test_unknown_brackets_leave_no_lock_entries() {
        let manager = manager(CorrectionPolicy::Cascade);
        for _ in 0..1000 {
            let id = uuid::Uuid::new_v4();
            let result = manager.start_match(id, 0).await;
            assert_eq!(result, Err(TournamentError::BracketNotFound(id)));
        }
        assert!(manager.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_lock_entries_released_after_concurrent_writes() {
        let manager = manager(CorrectionPolicy::Cascade);
        let stored = manager
            .create_bracket(&entrants(8), &single_set())
            .await
            .expect("create");
        let id = stored.id;

        let handles: Vec<_> = (0..4)
            .map(|match_id| {
                let manager = manager.clone();
                tokio::spawn(async move {
                    manager
                        .submit_score(id, match_id, vec![SetScore::new(21, 15)])
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("score");
        }

        let loaded = manager.get_bracket(id).await.expect("load");
        assert_eq!(loaded.revision, 4);
        assert!(manager.locks.lock().await.is_empty());
    }
}
