//! Stats provider: guild membership and per-player character state.
//!
//! [`StatsClient`] is the seam between the scan and the remote game-data
//! API. [`SwgohHelpClient`] speaks the swgoh.help protocol; tests swap in
//! mocks or in-process servers.

pub mod batch;
pub mod http;
pub mod models;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{AllyCode, GuildRoster, RosterBatch};
use crate::error::WatchError;

pub use batch::{batches, fetch_batch};
pub use http::SwgohHelpClient;

/// Sign-in credentials for the stats provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account user name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// OAuth client identifier sent with the password grant.
    pub client_id: String,
    /// OAuth client secret sent with the password grant.
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by a successful sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Remote game-data API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Signs in and returns a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Auth`] on rejected credentials or transport
    /// failure.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, WatchError>;

    /// Resolves the guild (or guilds) that `seed` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Fetch`] on transport failure and
    /// [`WatchError::DataShape`] on a malformed payload.
    async fn fetch_guild_roster(
        &self,
        token: &AccessToken,
        seed: &AllyCode,
    ) -> Result<Vec<GuildRoster>, WatchError>;

    /// Fetches character state for every player in `ally_codes`.
    /// Malformed player objects are returned in [`RosterBatch::rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Fetch`] on transport failure and
    /// [`WatchError::DataShape`] if the body is not a list of players.
    async fn fetch_character_stats(
        &self,
        token: &AccessToken,
        ally_codes: &[AllyCode],
    ) -> Result<RosterBatch, WatchError>;
}
