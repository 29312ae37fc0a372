//! Character record store: the persisted snapshot a scan diffs against.
//!
//! [`CharacterRecordStore`] is partitioned by ally code. The PostgreSQL
//! implementation backs production runs; [`InMemoryRecordStore`] serves
//! tests and throwaway deployments.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{AllyCode, CharacterRecord};
use crate::error::WatchError;

pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

/// Per-player record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRecordStore: Send + Sync {
    /// Returns every record persisted for `ally_code`. An empty list means
    /// the player has never been seen.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::StoreQuery`] if the store cannot be read.
    async fn query_by_ally_code(
        &self,
        ally_code: &AllyCode,
    ) -> Result<Vec<CharacterRecord>, WatchError>;

    /// Inserts or fully overwrites the record for
    /// `(record.ally_code, record.character_id)`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::StoreWrite`] if the write is rejected.
    async fn upsert(&self, record: &CharacterRecord) -> Result<(), WatchError>;
}
