//! swgoh.help HTTP client.

use std::time::Duration;

use async_trait::async_trait;

use super::models::{RosterRequest, TokenResponse, parse_guild_response, parse_roster_response};
use super::{AccessToken, Credentials, StatsClient};
use crate::domain::{AllyCode, GuildRoster, RosterBatch};
use crate::error::WatchError;

/// [`StatsClient`] backed by the swgoh.help REST API.
#[derive(Debug, Clone)]
pub struct SwgohHelpClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwgohHelpClient {
    /// Creates a client for `base_url` (e.g. `https://api.swgoh.help`).
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Reads a successful response body, mapping transport faults and
    /// non-2xx statuses to [`WatchError::Fetch`].
    async fn read_body(
        response: Result<reqwest::Response, reqwest::Error>,
        what: &str,
    ) -> Result<String, WatchError> {
        let response = response.map_err(|e| WatchError::Fetch(format!("{what}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Fetch(format!("{what}: HTTP {}", status.as_u16())));
        }
        response
            .text()
            .await
            .map_err(|e| WatchError::Fetch(format!("{what}: {e}")))
    }
}

#[async_trait]
impl StatsClient for SwgohHelpClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, WatchError> {
        let response = self
            .client
            .post(self.url("/auth/signin"))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("grant_type", "password"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WatchError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Auth(format!("HTTP {}", status.as_u16())));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| WatchError::Auth(format!("malformed token response: {e}")))?;

        tracing::debug!(username = %credentials.username, "signed in to stats provider");
        Ok(AccessToken::new(token.access_token))
    }

    async fn fetch_guild_roster(
        &self,
        token: &AccessToken,
        seed: &AllyCode,
    ) -> Result<Vec<GuildRoster>, WatchError> {
        let response = self
            .client
            .post(self.url("/swgoh/guilds"))
            .bearer_auth(token.as_str())
            .form(&[("allycodes", seed.as_str())])
            .send()
            .await;
        let body = Self::read_body(response, "guild roster").await?;
        parse_guild_response(&body)
    }

    async fn fetch_character_stats(
        &self,
        token: &AccessToken,
        ally_codes: &[AllyCode],
    ) -> Result<RosterBatch, WatchError> {
        let response = self
            .client
            .post(self.url("/swgoh/roster"))
            .bearer_auth(token.as_str())
            .json(&RosterRequest::new(ally_codes))
            .send()
            .await;
        let body = Self::read_body(response, "character stats").await?;
        parse_roster_response(&body)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::extract::Form;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};

    use super::*;

    const TOKEN: &str = "tok-123";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TOKEN}"))
    }

    async fn signin(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        let ok = form.get("username").is_some_and(|u| u == "kel")
            && form.get("password").is_some_and(|p| p == "pw")
            && form.get("grant_type").is_some_and(|g| g == "password");
        if ok {
            (StatusCode::OK, Json(serde_json::json!({ "access_token": TOKEN }))).into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    async fn guilds(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        let seed = form.get("allycodes").cloned().unwrap_or_default();
        Json(serde_json::json!([
            { "name": "Rebel Scum", "roster": [ { "allyCode": seed.parse::<u64>().unwrap_or(0) }, { "allyCode": 444_555_666 } ] }
        ]))
        .into_response()
    }

    async fn roster(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        let players: Vec<serde_json::Value> = body["allycodes"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|code| {
                serde_json::json!({
                    "REY": [{ "allyCode": code, "player": format!("p{code}"), "gearLevel": 11, "starLevel": 7, "zetas": [] }]
                })
            })
            .collect();
        Json(players).into_response()
    }

    async fn spawn_provider() -> String {
        let app = Router::new()
            .route("/auth/signin", post(signin))
            .route("/swgoh/guilds", post(guilds))
            .route("/swgoh/roster", post(roster))
            .route("/broken/swgoh/roster", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let Ok(listener) = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
        else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            username: "kel".to_string(),
            password: password.to_string(),
            client_id: "abc".to_string(),
            client_secret: "123".to_string(),
        }
    }

    fn client(base: &str) -> SwgohHelpClient {
        let Ok(client) = SwgohHelpClient::new(base, Duration::from_secs(5)) else {
            panic!("client build failed");
        };
        client
    }

    fn code(raw: &str) -> AllyCode {
        let Ok(code) = AllyCode::parse(raw) else {
            panic!("valid ally code");
        };
        code
    }

    #[tokio::test]
    async fn authenticate_returns_token() {
        let base = spawn_provider().await;
        let token = tokio_test::assert_ok!(client(&base).authenticate(&credentials("pw")).await);
        assert_eq!(token.as_str(), TOKEN);
    }

    #[tokio::test]
    async fn bad_password_is_auth_error() {
        let base = spawn_provider().await;
        let result = client(&base).authenticate(&credentials("wrong")).await;
        assert!(matches!(result, Err(WatchError::Auth(_))));
    }

    #[tokio::test]
    async fn unreachable_provider_is_auth_error() {
        let result = client("http://127.0.0.1:1").authenticate(&credentials("pw")).await;
        assert!(matches!(result, Err(WatchError::Auth(_))));
    }

    #[tokio::test]
    async fn fetches_guild_roster_with_bearer() {
        let base = spawn_provider().await;
        let client = client(&base);
        let guilds = tokio_test::assert_ok!(
            client
                .fetch_guild_roster(&AccessToken::new(TOKEN), &code("111222333"))
                .await
        );
        let merged = GuildRoster::merge(guilds);
        assert_eq!(merged.guild_name, "Rebel Scum");
        assert_eq!(merged.members, vec![code("111222333"), code("444555666")]);
    }

    #[tokio::test]
    async fn wrong_token_is_fetch_error() {
        let base = spawn_provider().await;
        let result = client(&base)
            .fetch_guild_roster(&AccessToken::new("nope"), &code("111222333"))
            .await;
        assert!(matches!(result, Err(WatchError::Fetch(_))));
    }

    #[tokio::test]
    async fn fetches_character_stats_per_player() {
        let base = spawn_provider().await;
        let batch = tokio_test::assert_ok!(
            client(&base)
                .fetch_character_stats(
                    &AccessToken::new(TOKEN),
                    &[code("111222333"), code("444555666")],
                )
                .await
        );
        let codes: Vec<&str> = batch.players.iter().map(|p| p.ally_code.as_str()).collect();
        assert_eq!(codes, vec!["111222333", "444555666"]);
        assert!(batch.players.iter().all(|p| p.characters.len() == 1));
        assert!(batch.rejected.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_fetch_error() {
        let base = spawn_provider().await;
        let result = client(&format!("{base}/broken"))
            .fetch_character_stats(&AccessToken::new(TOKEN), &[code("111222333")])
            .await;
        assert!(matches!(result, Err(WatchError::Fetch(_))));
    }
}
