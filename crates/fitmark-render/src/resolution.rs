//! Mention detail resolution.
//!
//! Clicking a mention opens a detail surface (drawer, modal, panel) that
//! shows the display name immediately and the resolved detail once the
//! host's resolver answers.
//!
//! A [`DetailSurface`] keeps at most one request in flight. Every request
//! gets an id; retargeting the surface aborts the pending task, and only
//! the answer for the current id is ever applied. After `close()` no
//! update is produced.

use async_trait::async_trait;
use fitmark_core::{EntityReference, EntityType, MentionDetail, Resolution, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Host-provided lookup of mention detail.
///
/// Transport, caching and retries live behind this trait. `Ok(NotFound)`
/// is a normal outcome; `Err` is a transport failure.
#[async_trait]
pub trait MentionResolver: Send + Sync {
    async fn resolve(&self, entity_type: &EntityType, entity_id: &str) -> Result<Resolution>;
}

/// Resolver over a fixed set of details.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    details: HashMap<(EntityType, String), MentionDetail>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, detail: MentionDetail) {
        let key = (detail.entity_type(), detail.entity_id().to_string());
        self.details.insert(key, detail);
    }

    pub fn with(mut self, detail: MentionDetail) -> Self {
        self.insert(detail);
        self
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

#[async_trait]
impl MentionResolver for InMemoryResolver {
    async fn resolve(&self, entity_type: &EntityType, entity_id: &str) -> Result<Resolution> {
        let key = (entity_type.clone(), entity_id.to_string());
        Ok(match self.details.get(&key) {
            Some(detail) => Resolution::Found(detail.clone()),
            None => Resolution::NotFound,
        })
    }
}

/// What a detail surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Closed,
    /// Waiting on the resolver; the display name can be shown already
    Loading {
        request_id: u64,
        reference: EntityReference,
    },
    Ready {
        request_id: u64,
        reference: EntityReference,
        detail: MentionDetail,
    },
    /// Rendered as an empty state
    NotFound {
        request_id: u64,
        reference: EntityReference,
    },
    Failed {
        request_id: u64,
        reference: EntityReference,
        reason: String,
    },
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The mention this state is about
    pub fn reference(&self) -> Option<&EntityReference> {
        match self {
            Self::Closed => None,
            Self::Loading { reference, .. }
            | Self::Ready { reference, .. }
            | Self::NotFound { reference, .. }
            | Self::Failed { reference, .. } => Some(reference),
        }
    }

    /// Label to show: the authored display name, never re-fetched
    pub fn label(&self) -> Option<&str> {
        self.reference().map(|r| r.display_name.as_str())
    }

    pub fn request_id(&self) -> Option<u64> {
        match self {
            Self::Closed => None,
            Self::Loading { request_id, .. }
            | Self::Ready { request_id, .. }
            | Self::NotFound { request_id, .. }
            | Self::Failed { request_id, .. } => Some(*request_id),
        }
    }
}

struct PendingRequest {
    id: u64,
    handle: JoinHandle<Result<Resolution>>,
}

/// One open detail surface bound to a resolver.
///
/// `open` spawns onto the current tokio runtime.
pub struct DetailSurface<R> {
    resolver: Arc<R>,
    state: DetailState,
    last_request: u64,
    pending: Option<PendingRequest>,
}

impl<R: MentionResolver + 'static> DetailSurface<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_shared(Arc::new(resolver))
    }

    /// Surface sharing a resolver with other surfaces
    pub fn with_shared(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            state: DetailState::Closed,
            last_request: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Point the surface at a mention and start resolving it.
    ///
    /// Returns the request id. Reopening the target that is already in
    /// flight keeps the running request.
    pub fn open(&mut self, reference: EntityReference) -> u64 {
        if let (Some(pending), DetailState::Loading { reference: current, .. }) =
            (&self.pending, &self.state)
            && current.key() == reference.key()
        {
            return pending.id;
        }

        self.abort_pending();
        self.last_request += 1;
        let request_id = self.last_request;

        let resolver = Arc::clone(&self.resolver);
        let entity_type = reference.entity_type.clone();
        let entity_id = reference.entity_id.clone();
        let handle =
            tokio::spawn(async move { resolver.resolve(&entity_type, &entity_id).await });

        log::debug!(
            "Resolving {}:{} as request {}",
            reference.entity_type,
            reference.entity_id,
            request_id
        );
        self.pending = Some(PendingRequest {
            id: request_id,
            handle,
        });
        self.state = DetailState::Loading {
            request_id,
            reference,
        };
        request_id
    }

    /// Wait for the in-flight request and apply its outcome.
    ///
    /// Returns `None` when nothing is pending (closed, or already settled).
    pub async fn next_update(&mut self) -> Option<DetailState> {
        let pending = self.pending.as_mut()?;
        let request_id = pending.id;
        let joined = (&mut pending.handle).await;
        self.pending = None;

        let reference = match &self.state {
            DetailState::Loading {
                request_id: current,
                reference,
            } if *current == request_id => reference.clone(),
            _ => {
                log::warn!("Discarding stale response for request {}", request_id);
                return None;
            }
        };

        self.state = match joined {
            Ok(Ok(Resolution::Found(detail)))
                if detail.matches(&reference.entity_type, &reference.entity_id) =>
            {
                DetailState::Ready {
                    request_id,
                    reference,
                    detail,
                }
            }
            Ok(Ok(Resolution::Found(detail))) => {
                log::warn!(
                    "Resolver answered {}:{} for {}:{}",
                    detail.entity_type(),
                    detail.entity_id(),
                    reference.entity_type,
                    reference.entity_id
                );
                DetailState::NotFound {
                    request_id,
                    reference,
                }
            }
            Ok(Ok(Resolution::NotFound)) => DetailState::NotFound {
                request_id,
                reference,
            },
            Ok(Err(e)) => {
                log::warn!("Resolution failed: {}", e);
                DetailState::Failed {
                    request_id,
                    reference,
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                log::warn!("Resolution task ended abnormally: {}", e);
                DetailState::Failed {
                    request_id,
                    reference,
                    reason: e.to_string(),
                }
            }
        };

        Some(self.state.clone())
    }

    /// Close the surface and drop interest in any pending answer.
    pub fn close(&mut self) {
        self.abort_pending();
        self.state = DetailState::Closed;
    }
}

impl<R> DetailSurface<R> {
    fn abort_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Discarding pending request {}", pending.id);
            pending.handle.abort();
        }
    }
}

impl<R> Drop for DetailSurface<R> {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
