//! PostgreSQL implementation of the record store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::CharacterRecordStore;
use crate::domain::{AllyCode, CharacterRecord};
use crate::error::WatchError;

/// PostgreSQL-backed record store using `sqlx::PgPool`.
///
/// Records live in `character_records`, keyed by
/// `(ally_code, character_id)`. The schema is created by the embedded
/// migrations in `migrations/`.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::StoreQuery`] if no connection can be
    /// established within `connect_timeout`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, WatchError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| WatchError::StoreQuery(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::StoreWrite`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), WatchError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| WatchError::StoreWrite(e.to_string()))
    }
}

#[async_trait]
impl CharacterRecordStore for PostgresRecordStore {
    async fn query_by_ally_code(
        &self,
        ally_code: &AllyCode,
    ) -> Result<Vec<CharacterRecord>, WatchError> {
        let rows = sqlx::query_as::<_, (String, i32, i32, i32)>(
            "SELECT character_id, gear_level, star_level, zeta_count \
             FROM character_records WHERE ally_code = $1 ORDER BY character_id ASC",
        )
        .bind(ally_code.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| WatchError::StoreQuery(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(character_id, gear_level, star_level, zeta_count)| CharacterRecord {
                    ally_code: ally_code.clone(),
                    character_id,
                    gear_level,
                    star_level,
                    zeta_count,
                },
            )
            .collect())
    }

    async fn upsert(&self, record: &CharacterRecord) -> Result<(), WatchError> {
        sqlx::query(
            "INSERT INTO character_records \
             (ally_code, character_id, gear_level, star_level, zeta_count, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now()) \
             ON CONFLICT (ally_code, character_id) DO UPDATE SET \
             gear_level = EXCLUDED.gear_level, \
             star_level = EXCLUDED.star_level, \
             zeta_count = EXCLUDED.zeta_count, \
             updated_at = EXCLUDED.updated_at",
        )
        .bind(record.ally_code.as_str())
        .bind(&record.character_id)
        .bind(record.gear_level)
        .bind(record.star_level)
        .bind(record.zeta_count)
        .execute(&self.pool)
        .await
        .map_err(|e| WatchError::StoreWrite(e.to_string()))?;

        Ok(())
    }
}
