//! Domain layer: players, characters, notifications, and scan results.
//!
//! This module holds the value types shared by the diff engine, the
//! collaborator adapters, and the scan orchestrator. Nothing here performs
//! I/O except loading an optional character-name table from disk.

pub mod ally_code;
pub mod character_names;
pub mod character_record;
pub mod notification;
pub mod roster;
pub mod scan_report;

pub use ally_code::AllyCode;
pub use character_names::CharacterNames;
pub use character_record::CharacterRecord;
pub use notification::Notification;
pub use roster::{
    FetchedCharacterStat, GuildRoster, PlayerRoster, RejectedPlayer, RosterBatch, UNKNOWN_GUILD_NAME,
};
pub use scan_report::{
    DeliveryReport, FailureScope, GuildNotifications, GuildScanResult, ScanFailure, ScanReport,
};
