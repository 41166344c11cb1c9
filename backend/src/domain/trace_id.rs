//! Request correlation identifier.
//!
//! One `TraceId` is active per HTTP request. It lives in task-local storage
//! for the lifetime of the request future, so errors raised deep inside a
//! service can record it without every signature carrying it around. Work
//! moved onto another task must be wrapped in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header echoing the trace identifier, and accepted from upstream proxies.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Per-request trace identifier, always a non-nil UUID.
///
/// # Examples
/// ```
/// use recipe_api::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::from_inbound(Some("6f1c2b9e-4f5d-4c1a-9a63-2d4e8f0b7c11"));
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen.map(|id| id.to_string()).as_deref(), Some("6f1c2b9e-4f5d-4c1a-9a63-2d4e8f0b7c11"));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

/// Reasons an inbound value is not usable as a trace identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceIdError {
    #[error("trace identifier is not a UUID")]
    Malformed,
    #[error("trace identifier must not be the nil UUID")]
    Nil,
}

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied identifier when it parses, otherwise mint one.
    ///
    /// Lets a request keep the correlation id assigned by a proxy in front of
    /// the API while never trusting malformed input.
    #[must_use]
    pub fn from_inbound(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the active identifier.
    pub async fn scope<Fut: Future>(trace_id: TraceId, fut: Fut) -> Fut::Output {
        ACTIVE.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = TraceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s.trim()).map_err(|_| TraceIdError::Malformed)?;
        if uuid.is_nil() {
            return Err(TraceIdError::Nil);
        }
        Ok(Self(uuid))
    }
}
