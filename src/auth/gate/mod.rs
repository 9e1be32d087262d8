//! Authorization gate
//!
//! Turns a gate policy and the session's profile state into a tri-state
//! decision, and picks what guarded content should render.

mod policy;

pub use policy::GatePolicy;

use crate::auth::session::{ProfileState, SessionContext};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// Outcome of a gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The profile is still loading; render neither branch
    Pending,
    /// Render the guarded content
    Authorized,
    /// Render the fallback (or nothing)
    Unauthorized,
}

impl AccessDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AccessDecision::Authorized)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AccessDecision::Pending)
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccessDecision::Pending => "pending",
            AccessDecision::Authorized => "authorized",
            AccessDecision::Unauthorized => "unauthorized",
        };
        f.write_str(label)
    }
}

/// What a gate renders for the current state
#[derive(Debug, PartialEq, Eq)]
pub enum GateView<'a, F> {
    /// The guarded content
    Children,
    /// Neutral loading placeholder
    Loading,
    /// The configured fallback
    Fallback(&'a F),
    /// Nothing at all
    Nothing,
}

/// Guards content behind a [`GatePolicy`]
#[derive(Debug, Clone)]
pub struct AuthorizationGate<F = ()> {
    policy: GatePolicy,
    fallback: Option<F>,
}

impl<F> AuthorizationGate<F> {
    /// Create a gate without fallback content
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy,
            fallback: None,
        }
    }

    /// Content shown when access is refused
    pub fn with_fallback(mut self, fallback: F) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Decide access for the given profile state.
    ///
    /// Unrestricted gates are always authorized. Otherwise a loading profile
    /// is pending, a failed or anonymous one is refused, and a loaded actor
    /// is checked against the policy. Evaluation errors refuse access.
    pub fn decide(&self, state: &ProfileState) -> AccessDecision {
        if !self.policy.has_restrictions() {
            return AccessDecision::Authorized;
        }

        match state {
            ProfileState::Loading => AccessDecision::Pending,
            ProfileState::Failed(e) => {
                warn!(
                    "Refusing access, profile fetch failed ({:?}): {}",
                    e.category(),
                    e
                );
                AccessDecision::Unauthorized
            }
            ProfileState::Anonymous => {
                debug!("Refusing access, no authenticated actor");
                AccessDecision::Unauthorized
            }
            ProfileState::Loaded { actor, .. } => match self.policy.evaluate(actor) {
                Ok(true) => AccessDecision::Authorized,
                Ok(false) => AccessDecision::Unauthorized,
                Err(e) => {
                    error!(
                        "Error evaluating access for actor {} ({:?}): {}",
                        actor.id,
                        e.category(),
                        e
                    );
                    AccessDecision::Unauthorized
                }
            },
        }
    }

    /// Choose what to render for the given profile state
    pub fn render(&self, state: &ProfileState) -> GateView<'_, F> {
        match self.decide(state) {
            AccessDecision::Authorized => GateView::Children,
            AccessDecision::Pending => GateView::Loading,
            AccessDecision::Unauthorized if self.policy.hide_on_unauthorized => GateView::Nothing,
            AccessDecision::Unauthorized => match &self.fallback {
                Some(fallback) => GateView::Fallback(fallback),
                None => GateView::Nothing,
            },
        }
    }

    /// Wait for the session's profile to settle, then decide. Never pending.
    pub async fn resolve(&self, session: &SessionContext) -> AccessDecision {
        if !self.policy.has_restrictions() {
            return AccessDecision::Authorized;
        }

        let state = session.settled().await;
        self.decide(&state)
    }

    /// Wait for the next profile change and decide again.
    ///
    /// Returns `None` once the session has been dropped.
    pub async fn next_decision(
        &self,
        states: &mut watch::Receiver<ProfileState>,
    ) -> Option<AccessDecision> {
        states.changed().await.ok()?;
        let state = states.borrow_and_update().clone();
        Some(self.decide(&state))
    }
}
