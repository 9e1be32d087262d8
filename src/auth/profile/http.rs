//! HTTP profile source with bearer tokens and one-shot token refresh

use super::ProfileSource;
use super::raw::RawProfile;
use crate::auth::types::Actor;
use crate::config::ProfileSourceConfig;
use crate::utils::error::{AccessError, Result};
use crate::utils::truncate_string;
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Access and refresh tokens for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// Bearer token sent with profile requests
    pub access_token: String,
    /// Token exchanged for a new access token after a 401
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Fetches the actor profile from the backend REST API
#[derive(Debug)]
pub struct HttpProfileSource {
    client: reqwest::Client,
    profile_url: String,
    refresh_url: String,
    tokens: RwLock<Option<SessionTokens>>,
}

impl HttpProfileSource {
    /// Create a new source from configuration. No tokens are held until `login`.
    pub fn new(config: &ProfileSourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            profile_url: format!("{}{}", base, config.profile_path),
            refresh_url: format!("{}{}", base, config.refresh_path),
            tokens: RwLock::new(None),
        })
    }

    /// Start a session with the given tokens
    pub fn login(&self, tokens: SessionTokens) {
        *self.tokens.write() = Some(tokens);
    }

    /// Drop the session tokens
    pub fn logout(&self) {
        *self.tokens.write() = None;
    }

    /// Current session tokens
    pub fn tokens(&self) -> Option<SessionTokens> {
        self.tokens.read().clone()
    }

    /// Replace the tokens only if they are still `expected`. Returns `false`
    /// when the session logged out or logged in again in the meantime.
    fn replace_tokens_if(&self, expected: &SessionTokens, next: Option<SessionTokens>) -> bool {
        let mut tokens = self.tokens.write();
        if tokens.as_ref() != Some(expected) {
            return false;
        }
        *tokens = next;
        true
    }

    async fn request_profile(&self, access_token: &str) -> Result<reqwest::Response> {
        debug!("Requesting actor profile from {}", self.profile_url);
        Ok(self
            .client
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await?)
    }

    /// Exchange the refresh token. `Ok(None)` means the backend rejected it.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<SessionTokens>> {
        debug!("Refreshing access token");

        let response = self
            .client
            .post(&self.refresh_url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Refresh token rejected with status {}", status);
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccessError::profile_fetch(format!(
                "refresh endpoint returned {}: {}",
                status,
                truncate_string(&body, 200)
            )));
        }

        let body = response.text().await?;
        let refreshed: RefreshResponse = serde_json::from_str(&body)?;

        Ok(Some(SessionTokens {
            access_token: refreshed.access_token,
            refresh_token: refreshed
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
        }))
    }

    async fn parse_profile(response: reqwest::Response) -> Result<Actor> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccessError::profile_fetch(format!(
                "profile endpoint returned {}: {}",
                status,
                truncate_string(&body, 200)
            )));
        }

        let body = response.text().await?;
        let raw: RawProfile = serde_json::from_str(&body)?;
        Actor::try_from(raw)
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self) -> Result<Option<Actor>> {
        let Some(tokens) = self.tokens() else {
            debug!("No session tokens, treating actor as anonymous");
            return Ok(None);
        };

        let response = self.request_profile(&tokens.access_token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::parse_profile(response).await.map(Some);
        }

        let Some(refresh_token) = tokens.refresh_token.as_deref() else {
            info!("Access token rejected and no refresh token held, ending session");
            self.replace_tokens_if(&tokens, None);
            return Ok(None);
        };

        let Some(refreshed) = self.refresh(refresh_token).await? else {
            info!("Session expired, ending session");
            self.replace_tokens_if(&tokens, None);
            return Ok(None);
        };

        let access_token = refreshed.access_token.clone();
        if !self.replace_tokens_if(&tokens, Some(refreshed.clone())) {
            debug!("Session tokens changed during refresh, dropping refreshed tokens");
            return Ok(None);
        }

        let retry = self.request_profile(&access_token).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            warn!("Profile request rejected after token refresh, ending session");
            self.replace_tokens_if(&refreshed, None);
            return Ok(None);
        }

        Self::parse_profile(retry).await.map(Some)
    }

    fn clear_credentials(&self) {
        self.logout();
    }
}
