//! HeyGen Streaming Avatar Client
//!
//! Concrete implementation of the core `AvatarClient` seam against the
//! HeyGen streaming HTTP API. Session creation is a two-step dance: the
//! long-lived API key is first exchanged for a short-lived token, and only
//! that token may open a streaming session. Every call is a single attempt;
//! retrying is the trainee's decision, not the client's.

use async_trait::async_trait;
use clinsim_core::avatar::{AvatarClient, AvatarError, AvatarSession};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

/// HTTP client for the HeyGen streaming avatar service.
pub struct HeyGenClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    quality: String,
}

impl HeyGenClient {
    pub fn new(api_key: String, base_url: String, quality: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
            quality,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.heygen_api_key.clone(),
            config.heygen_api_base.clone(),
            config.avatar_quality.clone(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Exchanges the API key for a short-lived session token.
    async fn create_token(&self) -> Result<String, AvatarError> {
        let response = self
            .http
            .post(self.endpoint("streaming.create_token"))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(transport)?;
        let response = require_success(response).await?;
        let body: TokenResponse = response.json().await.map_err(transport)?;
        Ok(body.data.token)
    }
}

#[async_trait]
impl AvatarClient for HeyGenClient {
    async fn create_session(
        &self,
        avatar_id: &str,
        knowledge_base_id: &str,
    ) -> Result<AvatarSession, AvatarError> {
        // A failed token exchange must not proceed to `streaming.new`.
        let token = self.create_token().await?;
        debug!(avatar_id, "session token issued; opening streaming session");

        let request = NewSessionRequest {
            quality: &self.quality,
            avatar_id,
            knowledge_base_id: Some(knowledge_base_id),
            voice: VoiceSettings {
                voice_id: "default",
            },
        };
        let response = self
            .http
            .post(self.endpoint("streaming.new"))
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        let response = require_success(response).await?;
        let body: NewSessionResponse = response.json().await.map_err(transport)?;

        Ok(AvatarSession {
            session_id: body.data.session_id,
            access_token: body.data.access_token,
            url: body.data.url,
        })
    }

    async fn speak(&self, session: &AvatarSession, text: &str) -> Result<(), AvatarError> {
        let request = TaskRequest {
            session_id: &session.session_id,
            text,
            task_type: "talk",
            task_mode: "sync",
        };
        let response = self
            .http
            .post(self.endpoint("streaming.task"))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        require_success(response).await?;
        Ok(())
    }

    async fn stop_session(&self, session: &AvatarSession) -> Result<(), AvatarError> {
        let request = StopRequest {
            session_id: &session.session_id,
        };
        let response = self
            .http
            .post(self.endpoint("streaming.stop"))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        require_success(response).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> AvatarError {
    AvatarError::Network(err.to_string())
}

/// Maps a non-success status to the error taxonomy.
fn classify_status(status: u16, message: String) -> AvatarError {
    match StatusCode::from_u16(status) {
        Ok(StatusCode::UNAUTHORIZED) => AvatarError::Unauthorized,
        Ok(StatusCode::FORBIDDEN) => AvatarError::Forbidden,
        _ => AvatarError::Service { status, message },
    }
}

/// Passes a 2xx response through; anything else becomes an `AvatarError`
/// carrying the service's own message where one exists.
async fn require_success(response: reqwest::Response) -> Result<reqwest::Response, AvatarError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(classify_status(status.as_u16(), message))
}

// --- Wire Format ---

#[derive(Serialize)]
struct NewSessionRequest<'a> {
    quality: &'a str,
    avatar_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    knowledge_base_id: Option<&'a str>,
    voice: VoiceSettings<'a>,
}

#[derive(Serialize)]
struct VoiceSettings<'a> {
    voice_id: &'a str,
}

#[derive(Serialize)]
struct TaskRequest<'a> {
    session_id: &'a str,
    text: &'a str,
    task_type: &'a str,
    task_mode: &'a str,
}

#[derive(Serialize)]
struct StopRequest<'a> {
    session_id: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    data: TokenData,
}

#[derive(Deserialize)]
struct TokenData {
    token: String,
}

#[derive(Deserialize)]
struct NewSessionResponse {
    data: SessionData,
}

#[derive(Deserialize)]
struct SessionData {
    session_id: String,
    access_token: String,
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_request_includes_knowledge_base() {
        let request = NewSessionRequest {
            quality: "high",
            avatar_id: "June_HR_public",
            knowledge_base_id: Some("kb-123"),
            voice: VoiceSettings {
                voice_id: "default",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["quality"], "high");
        assert_eq!(json["avatar_id"], "June_HR_public");
        assert_eq!(json["knowledge_base_id"], "kb-123");
        assert_eq!(json["voice"]["voice_id"], "default");
    }

    #[test]
    fn new_session_request_omits_missing_knowledge_base() {
        let request = NewSessionRequest {
            quality: "high",
            avatar_id: "June_HR_public",
            knowledge_base_id: None,
            voice: VoiceSettings {
                voice_id: "default",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("knowledge_base_id").is_none());
    }

    #[test]
    fn task_request_is_a_sync_talk_task() {
        let request = TaskRequest {
            session_id: "sess-1",
            text: "Hello there",
            task_type: "talk",
            task_mode: "sync",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "sess-1");
        assert_eq!(json["task_type"], "talk");
        assert_eq!(json["task_mode"], "sync");
    }

    #[test]
    fn session_descriptor_parses_from_the_data_envelope() {
        let body = r#"{
            "code": 100,
            "data": {
                "session_id": "sess-42",
                "access_token": "tok-42",
                "url": "wss://heygen.example/stream",
                "ice_servers": []
            }
        }"#;
        let parsed: NewSessionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.session_id, "sess-42");
        assert_eq!(parsed.data.access_token, "tok-42");
        assert_eq!(parsed.data.url, "wss://heygen.example/stream");
    }

    #[test]
    fn token_parses_from_the_data_envelope() {
        let body = r#"{"data": {"token": "short-lived"}}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.token, "short-lived");
    }

    #[test]
    fn statuses_map_onto_the_error_taxonomy() {
        assert!(matches!(
            classify_status(401, String::new()),
            AvatarError::Unauthorized
        ));
        assert!(matches!(
            classify_status(403, String::new()),
            AvatarError::Forbidden
        ));
        assert!(matches!(
            classify_status(500, "boom".into()),
            AvatarError::Service {
                status: 500,
                ref message
            } if message == "boom"
        ));
    }

    #[test]
    fn endpoints_join_without_duplicate_slashes() {
        let client = HeyGenClient::new(
            "key".into(),
            "https://api.heygen.com/v1/".into(),
            "high".into(),
        );
        assert_eq!(
            client.endpoint("streaming.new"),
            "https://api.heygen.com/v1/streaming.new"
        );
    }
}
