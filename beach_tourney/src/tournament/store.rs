//! Bracket persistence.
//!
//! The engine hands the store a batch of match records per event; the
//! store must write the batch as one unit. [`MemoryStore`] does so under a
//! single write lock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::bracket::Bracket;
use crate::errors::{TournamentError, TournamentResult};
use crate::matches::Match;

/// Bracket identifier
pub type BracketId = Uuid;

/// A bracket as persisted, with its write revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBracket {
    pub id: BracketId,
    /// Incremented by every commit
    pub revision: u64,
    pub bracket: Bracket,
}

/// Trait for bracket storage
#[async_trait]
pub trait BracketStore: Send + Sync {
    /// Persist a new bracket at revision 0
    async fn insert(&self, bracket: Bracket) -> TournamentResult<StoredBracket>;

    /// Load the current snapshot of a bracket
    async fn load(&self, id: BracketId) -> TournamentResult<StoredBracket>;

    /// Replace a batch of match records atomically
    ///
    /// Fails without writing anything if the stored revision is not
    /// `expected_revision` or any record names an unknown match.
    async fn commit(
        &self,
        id: BracketId,
        expected_revision: u64,
        updates: Vec<Match>,
    ) -> TournamentResult<StoredBracket>;
}

/// In-memory `BracketStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    brackets: RwLock<HashMap<BracketId, StoredBracket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored brackets
    pub async fn len(&self) -> usize {
        self.brackets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.brackets.read().await.is_empty()
    }
}

#[async_trait]
impl BracketStore for MemoryStore {
    async fn insert(&self, bracket: Bracket) -> TournamentResult<StoredBracket> {
        let stored = StoredBracket {
            id: Uuid::new_v4(),
            revision: 0,
            bracket,
        };
        self.brackets
            .write()
            .await
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn load(&self, id: BracketId) -> TournamentResult<StoredBracket> {
        self.brackets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TournamentError::BracketNotFound(id))
    }

    async fn commit(
        &self,
        id: BracketId,
        expected_revision: u64,
        updates: Vec<Match>,
    ) -> TournamentResult<StoredBracket> {
        let mut brackets = self.brackets.write().await;
        let stored = brackets
            .get_mut(&id)
            .ok_or(TournamentError::BracketNotFound(id))?;

        if stored.revision != expected_revision {
            return Err(TournamentError::RevisionConflict {
                id,
                expected: expected_revision,
                actual: stored.revision,
            });
        }
        let match_count = stored.bracket.matches.len();
        if let Some(unknown) = updates.iter().find(|m| m.id >= match_count) {
            return Err(TournamentError::MatchNotFound(unknown.id));
        }

        for record in updates {
            let index = record.id;
            stored.bracket.matches[index] = record;
        }
        stored.revision += 1;
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{BracketConfig, build_bracket};
    use crate::matches::{Entrant, MatchStatus};

    fn bracket(n: i64) -> Bracket {
        let entrants: Vec<Entrant> = (1..=n)
            .map(|id| Entrant::new(id, format!("Team {id}"), id as u32))
            .collect();
        build_bracket(&entrants, &BracketConfig::default()).expect("valid bracket")
    }

    #[tokio::test]
    async fn test_insert_and_load() {
        let store = MemoryStore::new();
        let stored = store.insert(bracket(4)).await.expect("insert");
        assert_eq!(stored.revision, 0);
        assert_eq!(store.len().await, 1);

        let loaded = store.load(stored.id).await.expect("load");
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_load_unknown_bracket() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert_eq!(
            store.load(id).await,
            Err(TournamentError::BracketNotFound(id))
        );
    }

    #[tokio::test]
    async fn test_commit_bumps_revision() {
        let store = MemoryStore::new();
        let stored = store.insert(bracket(4)).await.expect("insert");

        let mut record = stored.bracket.matches[0].clone();
        record.status = MatchStatus::InProgress;
        let committed = store
            .commit(stored.id, 0, vec![record])
            .await
            .expect("commit");

        assert_eq!(committed.revision, 1);
        assert_eq!(committed.bracket.matches[0].status, MatchStatus::InProgress);
    }

    #[tokio::test]
    async fn test_stale_revision_rejected() {
        let store = MemoryStore::new();
        let stored = store.insert(bracket(4)).await.expect("insert");
        store
            .commit(stored.id, 0, Vec::new())
            .await
            .expect("first commit");

        let result = store.commit(stored.id, 0, Vec::new()).await;
        assert_eq!(
            result,
            Err(TournamentError::RevisionConflict {
                id: stored.id,
                expected: 0,
                actual: 1
            })
        );
    }

    #[tokio::test]
    async fn test_batch_with_unknown_match_writes_nothing() {
        let store = MemoryStore::new();
        let stored = store.insert(bracket(4)).await.expect("insert");

        let mut good = stored.bracket.matches[0].clone();
        good.status = MatchStatus::InProgress;
        let mut bad = stored.bracket.matches[1].clone();
        bad.id = 99;

        let result = store.commit(stored.id, 0, vec![good, bad]).await;
        assert_eq!(result, Err(TournamentError::MatchNotFound(99)));

        let loaded = store.load(stored.id).await.expect("load");
        assert_eq!(loaded, stored);
    }
}
