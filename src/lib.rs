//! # roster-watch
//!
//! Guild roster change detector for a mobile collectible game.
//!
//! Each scan signs in to the stats provider, resolves the membership of
//! every seeded guild, fetches each member's characters in fixed-size
//! batches, and compares them against the last persisted snapshot.
//! Unlocks, gear and star upgrades past a threshold, and new zetas are
//! grouped per guild and posted to a chat webhook in paced chunks.
//!
//! ## Architecture
//!
//! ```text
//! Triggers (HTTP POST /api/v1/scans, ScanScheduler)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ScanService (service/)
//!     │     ├── StatsClient (stats/)         swgoh.help
//!     │     ├── DiffEngine (engine/)         pure comparison
//!     │     ├── CharacterRecordStore (store/) PostgreSQL / memory
//!     │     └── NotificationDispatcher (notify/) Discord webhook
//!     │
//!     └── Domain types (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod notify;
pub mod service;
pub mod stats;
pub mod store;
