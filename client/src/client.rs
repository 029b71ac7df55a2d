use reqwest::Client;
use sweeper_common::models::{CreateRequest, Level, SessionConfig};
use tracing::{info, warn};
use url::Url;

use crate::Result;

/// HTTP client for session bootstrap against the game server.
pub struct SweeperClient {
    client: Client,
    base_url: Url,
}

impl SweeperClient {
    /// Create a new client connecting to the specified server URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::new();

        Ok(Self { client, base_url })
    }

    /// Create a session for `level` and derive its configuration.
    ///
    /// Issues exactly one creation request, no retry: on network error or a
    /// non-success status the failure is logged and propagated, and no
    /// session is formed.
    pub async fn create_session(&self, level: Level, player_name: &str) -> Result<SessionConfig> {
        if player_name.is_empty() {
            return Err("Player name must not be empty".into());
        }

        let create_url = self.base_url.join(&format!("/game/create/{level}"))?;
        let request = CreateRequest {
            player_name: player_name.to_string(),
        };

        let response = match self.client.post(create_url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Session creation request failed: {}", e);
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            warn!("Session creation rejected: {}", response.status());
            return Err(format!("Failed to create session: {}", response.status()).into());
        }

        let body: String = response.json().await?;
        let session_id = parse_session_id(&body).to_string();
        info!("Created session with ID: {}", session_id);

        Ok(SessionConfig::new(level, session_id, player_name.to_string()))
    }

    /// Get the WebSocket URL for a session's realtime channel
    pub fn websocket_url(&self, session_id: &str) -> Result<String> {
        let mut ws_url = self.base_url.clone();
        ws_url
            .set_scheme(match self.base_url.scheme() {
                "https" => "wss",
                _ => "ws",
            })
            .map_err(|_| "Failed to set WebSocket scheme")?;
        ws_url.set_path(&format!("/game/connect/{session_id}"));

        Ok(ws_url.to_string())
    }
}

/// Extract the session id from a creation response body.
///
/// The body is free text with the grammar `"<text>: <id>"`: the id is
/// everything after the last `:`, skipping exactly one separator character.
/// A body not matching that shape yields a garbage id; nothing validates it
/// further.
fn parse_session_id(body: &str) -> &str {
    match body.rfind(':') {
        Some(idx) => body.get(idx + 2..).unwrap_or(""),
        None => body,
    }
}
