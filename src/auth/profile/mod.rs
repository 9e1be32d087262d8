//! Actor profile sources
//!
//! A profile source answers "who is logged in, and with which role". The
//! backend payload is validated here, once, so evaluation downstream can
//! assume well-formed roles.

mod cache;
mod http;
mod raw;

pub use cache::ProfileCache;
pub use http::{HttpProfileSource, SessionTokens};
pub use raw::{RawPermission, RawProfile, RawRole};

use crate::auth::types::Actor;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Source of the current actor profile
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the current actor. `Ok(None)` means nobody is authenticated.
    async fn fetch_profile(&self) -> Result<Option<Actor>>;

    /// Forget any credentials held for the session
    fn clear_credentials(&self) {}
}

/// Profile source returning a fixed actor
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    actor: Option<Actor>,
}

impl StaticProfileSource {
    /// Source that always returns `actor`
    pub fn new(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    /// Source with nobody logged in
    pub fn anonymous() -> Self {
        Self { actor: None }
    }

    /// Parse a backend profile payload. A JSON `null` is an anonymous session.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Option<RawProfile> = serde_json::from_str(json)?;
        let actor = raw.map(Actor::try_from).transpose()?;
        Ok(Self { actor })
    }

    /// Read a backend profile payload from disk
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading actor profile from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn fetch_profile(&self) -> Result<Option<Actor>> {
        Ok(self.actor.clone())
    }
}
