//! Shared response-classification engine.
//!
//! One implementation serves every endpoint: transport failures pass through
//! untouched, the endpoint's success code selects its success decoder, and
//! error replies have their `status`/`error` fields extracted and matched
//! against the endpoint's signature table. Decoding ambiguity — unparseable
//! bodies, missing fields, a structured success body that fails to decode —
//! always collapses to [`ErrorKind::Internal`]; classification itself never
//! fails.

use breakwater_core::{Document, DocumentError, ErrorKind, SignatureTable};

use crate::operation::Response;
use crate::transport::{TransportError, TransportOutcome, WireResponse};

/// Canonical protocol-level success code for the management endpoints.
pub(crate) const STATUS_OK: u16 = 200;

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_FORBIDDEN: u16 = 403;

/// Classify one transport outcome into a typed response.
///
/// `decode` turns the raw reply into the endpoint's success payload and runs
/// only when the status equals `success_status`; its failure collapses to
/// [`ErrorKind::Internal`] like any other decoding ambiguity.
pub(crate) fn classify_wire<T, F>(
    correlation_id: &str,
    table: SignatureTable,
    success_status: u16,
    outcome: TransportOutcome,
    decode: F,
) -> Response<T>
where
    F: FnOnce(WireResponse) -> Result<T, DocumentError>,
{
    let reply = match outcome {
        Err(failure) => {
            let kind = match failure {
                TransportError::Network { .. } => ErrorKind::Network,
                TransportError::Timeout { .. } => ErrorKind::Timeout,
                TransportError::Cancelled => ErrorKind::Cancelled,
            };
            // No body to inspect; the failure kind passes through as-is.
            return Response::failure_with(correlation_id, kind, None, Some(failure.to_string()));
        }
        Ok(reply) => reply,
    };

    if reply.status == success_status {
        return match decode(reply) {
            Ok(payload) => Response::success(correlation_id, payload),
            Err(err) => {
                tracing::debug!(
                    correlation_id,
                    error = %err,
                    "success body failed to decode"
                );
                Response::failure_with(
                    correlation_id,
                    ErrorKind::Internal,
                    None,
                    Some(err.to_string()),
                )
            }
        };
    }

    let (status, message) = error_diagnostics(&reply.body);

    if matches!(reply.status, STATUS_UNAUTHORIZED | STATUS_FORBIDDEN) {
        return Response::failure_with(correlation_id, ErrorKind::Unauthorized, status, message);
    }

    let kind = message
        .as_deref()
        .map_or(ErrorKind::Internal, |msg| table.classify(msg));
    Response::failure_with(correlation_id, kind, status, message)
}

/// Best-effort extraction of the `status` and `error` fields from an error
/// body. Either field may be absent; whatever extracts is kept for
/// diagnostics.
fn error_diagnostics(body: &[u8]) -> (Option<String>, Option<String>) {
    let Ok(doc) = Document::parse(body) else {
        return (None, None);
    };
    let status = doc.str_field("status").ok().map(ToOwned::to_owned);
    let message = doc.str_field("error").ok().map(ToOwned::to_owned);
    (status, message)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use breakwater_core::Signature;
    use bytes::Bytes;

    use super::*;

    const TABLE: SignatureTable = SignatureTable::new(&[
        Signature::new("index not found", ErrorKind::NotFound),
        Signature::new("no planPIndexes for indexName", ErrorKind::NotReady),
    ]);

    fn reply(status: u16, body: &'static [u8]) -> TransportOutcome {
        Ok(WireResponse {
            status,
            body: Bytes::from_static(body),
        })
    }

    fn classify_opaque(outcome: TransportOutcome) -> Response<Bytes> {
        classify_wire("corr-1", TABLE, STATUS_OK, outcome, |reply| Ok(reply.body))
    }

    #[test]
    fn network_failure_passes_through() {
        let response = classify_opaque(Err(TransportError::Network {
            reason: "connection reset".into(),
        }));
        assert_eq!(response.error_kind(), Some(ErrorKind::Network));
        assert!(response.status.is_none());
    }

    #[test]
    fn timeout_failure_passes_through() {
        let response = classify_opaque(Err(TransportError::Timeout {
            timeout: Duration::from_secs(75),
        }));
        assert_eq!(response.error_kind(), Some(ErrorKind::Timeout));
    }

    #[test]
    fn cancellation_passes_through() {
        let response = classify_opaque(Err(TransportError::Cancelled));
        assert_eq!(response.error_kind(), Some(ErrorKind::Cancelled));
    }

    #[test]
    fn success_status_runs_decoder() {
        let response = classify_opaque(reply(200, b"raw stats text"));
        assert_eq!(
            response.outcome.expect("payload"),
            Bytes::from_static(b"raw stats text")
        );
    }

    #[test]
    fn failed_success_decode_collapses_to_internal() {
        let response = classify_wire("corr-1", TABLE, STATUS_OK, reply(200, b"not json"), |r| {
            Document::parse(&r.body)?.u64_field("count")
        });
        assert_eq!(response.error_kind(), Some(ErrorKind::Internal));
    }

    #[test]
    fn error_body_is_matched_against_the_table() {
        let response =
            classify_opaque(reply(400, br#"{"status":"fail","error":"index not found"}"#));
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(response.status.as_deref(), Some("fail"));
        assert_eq!(response.message.as_deref(), Some("index not found"));
    }

    #[test]
    fn missing_error_field_collapses_to_internal_keeping_status() {
        let response = classify_opaque(reply(500, br#"{"status":"fail"}"#));
        assert_eq!(response.error_kind(), Some(ErrorKind::Internal));
        assert_eq!(response.status.as_deref(), Some("fail"));
        assert!(response.message.is_none());
    }

    #[test]
    fn unparseable_error_body_collapses_to_internal() {
        let response = classify_opaque(reply(500, b"<html>Bad Gateway</html>"));
        assert_eq!(response.error_kind(), Some(ErrorKind::Internal));
        assert!(response.status.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn unauthorized_status_wins_over_body_signatures() {
        let response =
            classify_opaque(reply(401, br#"{"status":"fail","error":"index not found"}"#));
        assert_eq!(response.error_kind(), Some(ErrorKind::Unauthorized));
        assert_eq!(response.message.as_deref(), Some("index not found"));
    }

    #[test]
    fn forbidden_status_maps_to_unauthorized() {
        let response = classify_opaque(reply(403, b""));
        assert_eq!(response.error_kind(), Some(ErrorKind::Unauthorized));
    }

    #[test]
    fn classify_is_idempotent() {
        let outcome = reply(400, br#"{"status":"fail","error":"index not found"}"#);
        let first = classify_opaque(outcome.clone());
        let second = classify_opaque(outcome);
        assert_eq!(first, second);
    }
}
