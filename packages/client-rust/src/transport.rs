//! Transport-channel boundary.
//!
//! The operation layer never opens sockets, resolves hosts, retries, or
//! enforces timeouts — all of that lives behind [`ManagementTransport`]. The
//! contract here is narrow: hand the transport one encoded request, get back
//! either a raw `(status, body)` reply or a transport-level failure, and
//! classify whatever comes back exactly once.

use std::time::Duration;

use async_trait::async_trait;
use breakwater_core::ServiceType;
use bytes::Bytes;
use http::Method;

// ---------------------------------------------------------------------------
// Wire request / response
// ---------------------------------------------------------------------------

/// Encoded request handed to the transport for dispatch.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// Cluster role that should receive this request; the transport routes
    /// on this tag.
    pub service: ServiceType,
    pub method: Method,
    /// Fully substituted path. Parameter segments are already
    /// percent-escaped by the encoder.
    pub path: String,
    pub body: Option<Bytes>,
    /// Content type for the body, when one is present.
    pub content_type: Option<&'static str>,
    /// Deadline the transport must enforce for the whole exchange.
    pub timeout: Duration,
    /// Caller correlation id, echoed into logs on both sides.
    pub correlation_id: String,
}

/// Raw reply from the transport: the status code as reported by the server
/// plus the opaque body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: Bytes,
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

/// Failures at the transport level, before any protocol reply exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {reason}")]
    Network { reason: String },
    #[error("request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },
    #[error("request was cancelled")]
    Cancelled,
}

/// Outcome of one dispatch attempt.
pub type TransportOutcome = Result<WireResponse, TransportError>;

// ---------------------------------------------------------------------------
// ManagementTransport trait
// ---------------------------------------------------------------------------

/// Pluggable channel that executes encoded requests against the cluster.
/// Implementations: HTTP connection pools per service, in-memory fakes
/// (tests).
///
/// Retry policy belongs to the implementation; a retry re-enters
/// [`ManagementTransport::dispatch`] with a freshly encoded request and never
/// resumes a partially classified response.
#[async_trait]
pub trait ManagementTransport: Send + Sync {
    /// Execute one encoded request, routing by its service tag.
    async fn dispatch(&self, request: WireRequest) -> TransportOutcome;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
