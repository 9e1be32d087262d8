//! Per-session actor profile state
//!
//! A `SessionContext` is created when a session is established and dropped on
//! logout. It is passed by reference to whatever needs the actor; there is no
//! process-wide auth state.

use crate::auth::profile::{ProfileCache, ProfileSource};
use crate::auth::types::Actor;
use crate::utils::error::AccessError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle of the actor profile fetch
#[derive(Debug, Clone)]
pub enum ProfileState {
    /// Fetch in flight
    Loading,
    /// Actor authenticated and profile available
    Loaded {
        actor: Arc<Actor>,
        fetched_at: DateTime<Utc>,
    },
    /// Nobody is authenticated
    Anonymous,
    /// The fetch failed
    Failed(Arc<AccessError>),
}

impl ProfileState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProfileState::Loading)
    }

    /// The loaded actor, if any
    pub fn actor(&self) -> Option<&Arc<Actor>> {
        match self {
            ProfileState::Loaded { actor, .. } => Some(actor),
            _ => None,
        }
    }
}

/// Profile state for one session
///
/// `refetch` and `end` start a new generation. A fetch begun in an earlier
/// generation never publishes its result.
pub struct SessionContext {
    cache_key: String,
    source: Arc<dyn ProfileSource>,
    cache: ProfileCache,
    state: watch::Sender<ProfileState>,
    generation: AtomicU64,
}

impl SessionContext {
    /// Create a session. The profile starts out `Loading` until `load` runs.
    pub fn new(
        cache_key: impl Into<String>,
        source: Arc<dyn ProfileSource>,
        cache: ProfileCache,
    ) -> Self {
        let (state, _) = watch::channel(ProfileState::Loading);
        Self {
            cache_key: cache_key.into(),
            source,
            cache,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Key under which this session's profile is cached
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Current profile state
    pub fn state(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent profile state change
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    /// Current actor, if loaded
    pub fn current_actor(&self) -> Option<Arc<Actor>> {
        self.state.borrow().actor().cloned()
    }

    /// Fetch the profile (through the cache) and publish the result
    pub async fn load(&self) -> ProfileState {
        let generation = self.generation.load(Ordering::SeqCst);
        let next = match self
            .cache
            .get_or_fetch(&self.cache_key, self.source.as_ref())
            .await
        {
            Ok(Some(actor)) => {
                debug!(
                    "Loaded profile for actor {} (role: {:?})",
                    actor.id,
                    actor.role().map(|r| r.name.as_str())
                );
                ProfileState::Loaded {
                    actor,
                    fetched_at: Utc::now(),
                }
            }
            Ok(None) => {
                debug!("No authenticated actor for session {}", self.cache_key);
                ProfileState::Anonymous
            }
            Err(e) => {
                warn!(
                    "Failed to load profile for session {} ({:?}, retryable: {}): {}",
                    self.cache_key,
                    e.category(),
                    e.is_retryable(),
                    e
                );
                ProfileState::Failed(e)
            }
        };

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next.clone();
            true
        });

        if published {
            next
        } else {
            debug!(
                "Session {} changed during the fetch, discarding the result",
                self.cache_key
            );
            self.state()
        }
    }

    /// Current state once it has settled, loading first if needed
    ///
    /// If a refetch supersedes our own load, waits for that one instead.
    pub async fn settled(&self) -> ProfileState {
        let mut states = self.subscribe();
        let current = states.borrow_and_update().clone();
        if !current.is_loading() {
            return current;
        }

        let loaded = self.load().await;
        if !loaded.is_loading() {
            return loaded;
        }

        match states.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Discard the cached profile and fetch it again, passing through `Loading`
    pub async fn refetch(&self) -> ProfileState {
        info!("Refetching profile for session {}", self.cache_key);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate(&self.cache_key).await;
        self.state.send_replace(ProfileState::Loading);
        self.load().await
    }

    /// End the session: drop credentials and the cached profile
    pub async fn end(&self) {
        info!("Ending session {}", self.cache_key);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.source.clear_credentials();
        self.cache.invalidate(&self.cache_key).await;
        self.state.send_replace(ProfileState::Anonymous);
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("cache_key", &self.cache_key)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
