//! In-process record store.
//!
//! [`InMemoryRecordStore`] keeps records in a `BTreeMap` per player behind a
//! [`tokio::sync::RwLock`]. Contents are lost on restart, so a fresh process
//! treats every player as a new signup.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CharacterRecordStore;
use crate::domain::{AllyCode, CharacterRecord};
use crate::error::WatchError;

/// Volatile [`CharacterRecordStore`].
///
/// Records for one player are returned ordered by character code.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    players: RwLock<HashMap<AllyCode, BTreeMap<String, CharacterRecord>>>,
    writes: AtomicUsize,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub async fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CharacterRecord>,
    {
        let store = Self::new();
        {
            let mut players = store.players.write().await;
            for record in records {
                players
                    .entry(record.ally_code.clone())
                    .or_default()
                    .insert(record.character_id.clone(), record);
            }
        }
        store
    }

    /// Number of successful [`CharacterRecordStore::upsert`] calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns one record, if present.
    pub async fn get(&self, ally_code: &AllyCode, character_id: &str) -> Option<CharacterRecord> {
        self.players
            .read()
            .await
            .get(ally_code)
            .and_then(|chars| chars.get(character_id))
            .cloned()
    }

    /// Total number of records across all players.
    pub async fn len(&self) -> usize {
        self.players.read().await.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CharacterRecordStore for InMemoryRecordStore {
    async fn query_by_ally_code(
        &self,
        ally_code: &AllyCode,
    ) -> Result<Vec<CharacterRecord>, WatchError> {
        let players = self.players.read().await;
        Ok(players
            .get(ally_code)
            .map(|chars| chars.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert(&self, record: &CharacterRecord) -> Result<(), WatchError> {
        let mut players = self.players.write().await;
        players
            .entry(record.ally_code.clone())
            .or_default()
            .insert(record.character_id.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
