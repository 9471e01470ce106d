//! The generic operation contract: every management endpoint is an
//! encode/classify pair over one request value.
//!
//! Per request the flow is `Encoding -> InFlight -> Classifying -> Done`,
//! driven once by [`execute`]. The contract itself is stateless and pure
//! aside from correlation-id generation at construction; any number of
//! requests may be encoded and classified concurrently.

use std::time::Duration;

use breakwater_core::{ErrorKind, ServiceType};

use crate::transport::{ManagementTransport, TransportOutcome, WireRequest};

// ---------------------------------------------------------------------------
// Encode errors
// ---------------------------------------------------------------------------

/// Errors raised while encoding a request.
///
/// Encoding fails only when the request's own parameters are structurally
/// invalid; validation always happens before any network effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("required field `{field}` must not be empty")]
    EmptyField { field: &'static str },
    #[error("request body could not be serialized: {reason}")]
    Body { reason: String },
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Typed outcome of one operation.
///
/// Produced exactly once per request by the classify step. The outcome is
/// success XOR one taxonomy error kind; the raw `status` and `error` strings
/// from the server are retained for logging only.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// Correlation id copied verbatim from the originating request.
    pub correlation_id: String,
    /// Success payload or the classified error kind. Never both.
    pub outcome: Result<T, ErrorKind>,
    /// Raw `status` field extracted from an error body. Diagnostic only.
    pub status: Option<String>,
    /// Raw error message from the server or the transport. Diagnostic only,
    /// never for control flow.
    pub message: Option<String>,
}

impl<T> Response<T> {
    pub(crate) fn success(correlation_id: &str, payload: T) -> Self {
        Self {
            correlation_id: correlation_id.to_owned(),
            outcome: Ok(payload),
            status: None,
            message: None,
        }
    }

    pub(crate) fn failure_with(
        correlation_id: &str,
        kind: ErrorKind,
        status: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.to_owned(),
            outcome: Err(kind),
            status,
            message,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The classified error kind, if the operation failed.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.outcome.as_ref().err().copied()
    }
}

// ---------------------------------------------------------------------------
// Operation trait
// ---------------------------------------------------------------------------

/// One management endpoint: a request shape paired with its wire encoding
/// and its response classifier.
///
/// Implementations hold endpoint parameters plus the correlation id and
/// timeout stamped at construction. Both `encode` and `classify` are
/// deterministic and side-effect-free beyond reading request fields.
pub trait Operation {
    /// Success payload produced by `classify`.
    type Payload;

    /// Cluster role that should receive this request.
    const SERVICE: ServiceType;

    /// Correlation id generated at construction, unique per request and
    /// reused verbatim in the response.
    fn correlation_id(&self) -> &str;

    /// Timeout the transport must enforce for this call.
    fn timeout(&self) -> Duration;

    /// Encode into a wire request.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when a required parameter is structurally
    /// invalid; nothing has touched the network at that point.
    fn encode(&self) -> Result<WireRequest, EncodeError>;

    /// Classify a transport outcome into exactly one response.
    ///
    /// Total: never panics and never yields a partially constructed
    /// response, whatever the transport produced.
    fn classify(&self, outcome: TransportOutcome) -> Response<Self::Payload>;
}

/// Fresh correlation id for a new request. Not security-sensitive; used for
/// cross-referencing client and server logs.
pub(crate) fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Drive one operation through a transport: encode, dispatch, classify.
///
/// Requests rejected by local validation never reach the transport; they
/// come back as an [`ErrorKind::InvalidArgument`] outcome with the encode
/// error as the diagnostic message.
pub async fn execute<O, T>(operation: &O, transport: &T) -> Response<O::Payload>
where
    O: Operation,
    T: ManagementTransport + ?Sized,
{
    let request = match operation.encode() {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(
                service = O::SERVICE.name(),
                correlation_id = operation.correlation_id(),
                error = %err,
                "request rejected before dispatch"
            );
            return Response::failure_with(
                operation.correlation_id(),
                ErrorKind::InvalidArgument,
                None,
                Some(err.to_string()),
            );
        }
    };

    tracing::debug!(
        service = O::SERVICE.name(),
        correlation_id = %request.correlation_id,
        method = %request.method,
        path = %request.path,
        "dispatching management request"
    );

    let outcome = transport.dispatch(request).await;
    let response = operation.classify(outcome);

    tracing::debug!(
        service = O::SERVICE.name(),
        correlation_id = %response.correlation_id,
        outcome = if response.is_success() { "ok" } else { "error" },
        "operation classified"
    );

    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use breakwater_core::ClientConfig;
    use bytes::Bytes;

    use super::*;
    use crate::ops::search_index::SearchIndexStatsRequest;
    use crate::transport::{TransportError, WireResponse};

    /// Transport returning a canned reply and counting dispatches.
    struct FixedTransport {
        status: u16,
        body: &'static [u8],
        calls: AtomicU32,
    }

    impl FixedTransport {
        fn new(status: u16, body: &'static [u8]) -> Self {
            Self {
                status,
                body,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl ManagementTransport for FixedTransport {
        async fn dispatch(&self, _request: WireRequest) -> TransportOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse {
                status: self.status,
                body: Bytes::from_static(self.body),
            })
        }
    }

    /// Transport that always fails at the network level.
    struct FailingTransport {
        error: TransportError,
    }

    #[async_trait]
    impl ManagementTransport for FailingTransport {
        async fn dispatch(&self, _request: WireRequest) -> TransportOutcome {
            Err(self.error.clone())
        }
    }

    #[tokio::test]
    async fn execute_classifies_success() {
        let transport = FixedTransport::new(200, br#"{"feeds":{}}"#);
        let request = SearchIndexStatsRequest::new("travel", &ClientConfig::default());

        let response = execute(&request, &transport).await;

        assert_eq!(response.correlation_id, request.correlation_id());
        assert_eq!(
            response.outcome.expect("success"),
            Bytes::from_static(br#"{"feeds":{}}"#)
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_transport() {
        let transport = FixedTransport::new(200, b"");
        let request = SearchIndexStatsRequest::new("", &ClientConfig::default());

        let response = execute(&request, &transport).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(response.correlation_id, request.correlation_id());
        assert!(response.message.expect("encode error text").contains("index_name"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_timeout_passes_through_untouched() {
        let transport = FailingTransport {
            error: TransportError::Timeout {
                timeout: Duration::from_secs(75),
            },
        };
        let request = SearchIndexStatsRequest::new("travel", &ClientConfig::default());

        let response = execute(&request, &transport).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::Timeout));
        assert_eq!(response.correlation_id, request.correlation_id());
        // Transport failures are classified without touching the body.
        assert!(response.status.is_none());
    }

    #[tokio::test]
    async fn per_call_timeout_override_lands_on_the_wire() {
        let request = SearchIndexStatsRequest::new("travel", &ClientConfig::default())
            .with_timeout(Duration::from_secs(5));
        let wire = request.encode().expect("encode");
        assert_eq!(wire.timeout, Duration::from_secs(5));
    }
}
