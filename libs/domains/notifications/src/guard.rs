//! Messaging guard.
//!
//! Decides whether an organization may receive template mail right now.
//! Decisions come from a [`MembershipSource`] and are cached per organization:
//! allowed decisions for [`GuardConfig::allowed_ttl`], blocked ones for the
//! shorter [`GuardConfig::blocked_ttl`]. Concurrent checks for the same
//! organization share a single in-flight lookup.
//!
//! A failed lookup fails open: the send is allowed and nothing is cached, so
//! the next check asks the source again. Expired decisions are swept whenever
//! a new lookup starts.

use crate::error::NotificationResult;
use async_trait::async_trait;
use core_config::{env_parse_or, ConfigError, FromEnv};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Whether an organization is cut off from messaging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardDecision {
    pub hard_blocked: bool,
    /// Why messaging is blocked (for logs and skipped-send results).
    pub reason: Option<String>,
}

impl GuardDecision {
    pub fn allowed() -> Self {
        Self::default()
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            hard_blocked: true,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        !self.hard_blocked
    }
}

/// Answers whether an organization's membership permits messaging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipSource: Send + Sync {
    async fn lookup(&self, organization_id: &str) -> NotificationResult<GuardDecision>;
}

/// Cache lifetimes for guard decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    pub allowed_ttl: Duration,
    pub blocked_ttl: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            allowed_ttl: Duration::from_secs(60),
            blocked_ttl: Duration::from_secs(15),
        }
    }
}

impl FromEnv for GuardConfig {
    /// Reads from environment variables with defaults:
    /// - MESSAGING_GUARD_ALLOWED_TTL_SECS: 60
    /// - MESSAGING_GUARD_BLOCKED_TTL_SECS: 15
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            allowed_ttl: Duration::from_secs(env_parse_or("MESSAGING_GUARD_ALLOWED_TTL_SECS", 60)?),
            blocked_ttl: Duration::from_secs(env_parse_or("MESSAGING_GUARD_BLOCKED_TTL_SECS", 15)?),
        })
    }
}

/// `None` when the source failed.
type SharedLookup = Shared<BoxFuture<'static, Option<GuardDecision>>>;

enum Slot {
    Ready {
        decision: GuardDecision,
        expires_at: Instant,
    },
    Pending(SharedLookup),
}

/// Process-wide cache in front of a [`MembershipSource`].
pub struct MessagingGuard {
    source: Arc<dyn MembershipSource>,
    config: GuardConfig,
    slots: Mutex<HashMap<String, Slot>>,
}

impl MessagingGuard {
    pub fn new(source: Arc<dyn MembershipSource>, config: GuardConfig) -> Self {
        Self {
            source,
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Current decision for `organization_id`, from cache when fresh.
    pub async fn check(&self, organization_id: &str) -> GuardDecision {
        let lookup = {
            let mut slots = self.slots.lock().await;
            match slots.get(organization_id) {
                Some(Slot::Ready {
                    decision,
                    expires_at,
                }) if Instant::now() < *expires_at => {
                    debug!(organization_id, "Messaging guard cache hit");
                    return decision.clone();
                }
                Some(Slot::Pending(lookup)) => lookup.clone(),
                _ => {
                    let now = Instant::now();
                    slots.retain(|_, slot| match slot {
                        Slot::Ready { expires_at, .. } => now < *expires_at,
                        Slot::Pending(_) => true,
                    });
                    let lookup = self.start_lookup(organization_id);
                    slots.insert(organization_id.to_string(), Slot::Pending(lookup.clone()));
                    lookup
                }
            }
        };

        let outcome = lookup.clone().await;

        let mut slots = self.slots.lock().await;
        // Another caller may already have settled or replaced this entry.
        let owns_slot = matches!(
            slots.get(organization_id),
            Some(Slot::Pending(pending)) if pending.ptr_eq(&lookup)
        );

        match outcome {
            Some(decision) => {
                if owns_slot {
                    let ttl = if decision.hard_blocked {
                        self.config.blocked_ttl
                    } else {
                        self.config.allowed_ttl
                    };
                    slots.insert(
                        organization_id.to_string(),
                        Slot::Ready {
                            decision: decision.clone(),
                            expires_at: Instant::now() + ttl,
                        },
                    );
                }
                decision
            }
            None => {
                if owns_slot {
                    slots.remove(organization_id);
                }
                GuardDecision::allowed()
            }
        }
    }

    pub async fn is_allowed(&self, organization_id: &str) -> bool {
        self.check(organization_id).await.is_allowed()
    }

    /// Forget the cached decision for one organization.
    pub async fn invalidate(&self, organization_id: &str) {
        self.slots.lock().await.remove(organization_id);
    }

    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    fn start_lookup(&self, organization_id: &str) -> SharedLookup {
        let source = Arc::clone(&self.source);
        let organization_id = organization_id.to_string();
        async move {
            match source.lookup(&organization_id).await {
                Ok(decision) => Some(decision),
                Err(e) => {
                    warn!(
                        organization_id = %organization_id,
                        error = %e,
                        "Membership lookup failed, allowing messaging"
                    );
                    None
                }
            }
        }
        .boxed()
        .shared()
    }
}
