//! Search-index management endpoints.
//!
//! All endpoints here target the search service's index-administration API
//! and share one signature table; `upsert` prepends its creation-conflict
//! entry. Each request stamps a fresh correlation id and the management
//! timeout from [`ClientConfig`] at construction.

use std::time::Duration;

use breakwater_core::{
    ClientConfig, Document, ErrorKind, ServiceType, Signature, SignatureTable,
};
use bytes::Bytes;
use http::Method;
use serde::{Deserialize, Serialize};

use super::{escape_segment, require_non_empty};
use crate::classify::{classify_wire, STATUS_OK};
use crate::operation::{new_correlation_id, EncodeError, Operation, Response};
use crate::transport::{TransportOutcome, WireRequest};

// ---------------------------------------------------------------------------
// Signature tables
// ---------------------------------------------------------------------------

/// Signatures shared by every search-index endpoint, in priority order.
/// The patterns are literal server wording; the regression tests below pin
/// them as a compatibility surface.
const SEARCH_INDEX_SIGNATURES: SignatureTable = SignatureTable::new(&[
    Signature::new("index not found", ErrorKind::NotFound),
    Signature::new("no planPIndexes for indexName", ErrorKind::NotReady),
]);

/// Upsert checks the creation-conflict wording ahead of the shared entries.
const UPSERT_SIGNATURES: SignatureTable = SignatureTable::new(&[
    Signature::new(
        "index with the same name already exists",
        ErrorKind::AlreadyExists,
    ),
    Signature::new("index not found", ErrorKind::NotFound),
    Signature::new("no planPIndexes for indexName", ErrorKind::NotReady),
]);

// ---------------------------------------------------------------------------
// Index definition
// ---------------------------------------------------------------------------

/// Definition of a search index as accepted by the management API.
///
/// Serialized as the JSON body of an upsert; field names follow the
/// server's camelCase wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexDefinition {
    /// Index name, unique per cluster.
    pub name: String,

    /// Index type, e.g. `"fulltext-index"` or `"fulltext-alias"`.
    #[serde(rename = "type")]
    pub index_type: String,

    /// Server-assigned UUID; required when updating an existing index.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uuid: Option<String>,

    /// Type of the data source feeding the index.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_type: Option<String>,

    /// Name of the data source (e.g. the bucket) feeding the index.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_name: Option<String>,

    /// UUID of the data source, when pinned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_uuid: Option<String>,

    /// Type-specific index parameters, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<serde_json::Value>,

    /// Plan parameters (partitioning, replica counts), passed through
    /// opaquely.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plan_params: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Get index stats
// ---------------------------------------------------------------------------

/// Fetch the raw statistics document for one search index.
///
/// The success payload is the body verbatim; stats are reported in a
/// server-version-dependent shape the client does not interpret.
#[derive(Debug, Clone)]
pub struct SearchIndexStatsRequest {
    correlation_id: String,
    timeout: Duration,
    index_name: String,
}

impl SearchIndexStatsRequest {
    #[must_use]
    pub fn new(index_name: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            timeout: config.management_timeout,
            index_name: index_name.into(),
        }
    }

    /// Override the config-derived timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

impl Operation for SearchIndexStatsRequest {
    type Payload = Bytes;

    const SERVICE: ServiceType = ServiceType::Search;

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode(&self) -> Result<WireRequest, EncodeError> {
        require_non_empty(&self.index_name, "index_name")?;
        Ok(WireRequest {
            service: Self::SERVICE,
            method: Method::GET,
            path: format!("/api/stats/index/{}", escape_segment(&self.index_name)),
            body: None,
            content_type: None,
            timeout: self.timeout,
            correlation_id: self.correlation_id.clone(),
        })
    }

    fn classify(&self, outcome: TransportOutcome) -> Response<Bytes> {
        classify_wire(
            &self.correlation_id,
            SEARCH_INDEX_SIGNATURES,
            STATUS_OK,
            outcome,
            |reply| Ok(reply.body),
        )
    }
}

// ---------------------------------------------------------------------------
// Get indexed document count
// ---------------------------------------------------------------------------

/// Fetch the number of documents currently indexed.
#[derive(Debug, Clone)]
pub struct SearchIndexDocumentCountRequest {
    correlation_id: String,
    timeout: Duration,
    index_name: String,
}

impl SearchIndexDocumentCountRequest {
    #[must_use]
    pub fn new(index_name: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            timeout: config.management_timeout,
            index_name: index_name.into(),
        }
    }

    /// Override the config-derived timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

impl Operation for SearchIndexDocumentCountRequest {
    type Payload = u64;

    const SERVICE: ServiceType = ServiceType::Search;

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode(&self) -> Result<WireRequest, EncodeError> {
        require_non_empty(&self.index_name, "index_name")?;
        Ok(WireRequest {
            service: Self::SERVICE,
            method: Method::GET,
            path: format!("/api/index/{}/count", escape_segment(&self.index_name)),
            body: None,
            content_type: None,
            timeout: self.timeout,
            correlation_id: self.correlation_id.clone(),
        })
    }

    fn classify(&self, outcome: TransportOutcome) -> Response<u64> {
        classify_wire(
            &self.correlation_id,
            SEARCH_INDEX_SIGNATURES,
            STATUS_OK,
            outcome,
            |reply| Document::parse(&reply.body)?.u64_field("count"),
        )
    }
}

// ---------------------------------------------------------------------------
// Drop index
// ---------------------------------------------------------------------------

/// Delete a search index and its plan.
#[derive(Debug, Clone)]
pub struct DropSearchIndexRequest {
    correlation_id: String,
    timeout: Duration,
    index_name: String,
}

impl DropSearchIndexRequest {
    #[must_use]
    pub fn new(index_name: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            timeout: config.management_timeout,
            index_name: index_name.into(),
        }
    }

    /// Override the config-derived timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

impl Operation for DropSearchIndexRequest {
    type Payload = ();

    const SERVICE: ServiceType = ServiceType::Search;

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode(&self) -> Result<WireRequest, EncodeError> {
        require_non_empty(&self.index_name, "index_name")?;
        Ok(WireRequest {
            service: Self::SERVICE,
            method: Method::DELETE,
            path: format!("/api/index/{}", escape_segment(&self.index_name)),
            body: None,
            content_type: None,
            timeout: self.timeout,
            correlation_id: self.correlation_id.clone(),
        })
    }

    fn classify(&self, outcome: TransportOutcome) -> Response<()> {
        classify_wire(
            &self.correlation_id,
            SEARCH_INDEX_SIGNATURES,
            STATUS_OK,
            outcome,
            |_reply| Ok(()),
        )
    }
}

// ---------------------------------------------------------------------------
// Upsert index
// ---------------------------------------------------------------------------

/// Create a search index, or update it when the definition carries the
/// existing index's UUID.
#[derive(Debug, Clone)]
pub struct UpsertSearchIndexRequest {
    correlation_id: String,
    timeout: Duration,
    index: SearchIndexDefinition,
}

impl UpsertSearchIndexRequest {
    #[must_use]
    pub fn new(index: SearchIndexDefinition, config: &ClientConfig) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            timeout: config.management_timeout,
            index,
        }
    }

    /// Override the config-derived timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index(&self) -> &SearchIndexDefinition {
        &self.index
    }
}

impl Operation for UpsertSearchIndexRequest {
    type Payload = ();

    const SERVICE: ServiceType = ServiceType::Search;

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode(&self) -> Result<WireRequest, EncodeError> {
        require_non_empty(&self.index.name, "index.name")?;
        require_non_empty(&self.index.index_type, "index.type")?;
        let body = serde_json::to_vec(&self.index).map_err(|err| EncodeError::Body {
            reason: err.to_string(),
        })?;
        Ok(WireRequest {
            service: Self::SERVICE,
            method: Method::PUT,
            path: format!("/api/index/{}", escape_segment(&self.index.name)),
            body: Some(Bytes::from(body)),
            content_type: Some("application/json"),
            timeout: self.timeout,
            correlation_id: self.correlation_id.clone(),
        })
    }

    fn classify(&self, outcome: TransportOutcome) -> Response<()> {
        classify_wire(
            &self.correlation_id,
            UPSERT_SIGNATURES,
            STATUS_OK,
            outcome,
            |_reply| Ok(()),
        )
    }
}

// ---------------------------------------------------------------------------
// Ingest control
// ---------------------------------------------------------------------------

/// Whether index ingestion should be paused or resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestControl {
    Pause,
    Resume,
}

impl IngestControl {
    /// Path verb understood by the server.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            IngestControl::Pause => "pause",
            IngestControl::Resume => "resume",
        }
    }
}

/// Pause or resume document ingestion for one search index.
#[derive(Debug, Clone)]
pub struct SearchIndexIngestControlRequest {
    correlation_id: String,
    timeout: Duration,
    index_name: String,
    control: IngestControl,
}

impl SearchIndexIngestControlRequest {
    #[must_use]
    pub fn new(
        index_name: impl Into<String>,
        control: IngestControl,
        config: &ClientConfig,
    ) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            timeout: config.management_timeout,
            index_name: index_name.into(),
            control,
        }
    }

    /// Override the config-derived timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    #[must_use]
    pub fn control(&self) -> IngestControl {
        self.control
    }
}

impl Operation for SearchIndexIngestControlRequest {
    type Payload = ();

    const SERVICE: ServiceType = ServiceType::Search;

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode(&self) -> Result<WireRequest, EncodeError> {
        require_non_empty(&self.index_name, "index_name")?;
        Ok(WireRequest {
            service: Self::SERVICE,
            method: Method::POST,
            path: format!(
                "/api/index/{}/ingestControl/{}",
                escape_segment(&self.index_name),
                self.control.verb()
            ),
            body: None,
            content_type: None,
            timeout: self.timeout,
            correlation_id: self.correlation_id.clone(),
        })
    }

    fn classify(&self, outcome: TransportOutcome) -> Response<()> {
        classify_wire(
            &self.correlation_id,
            SEARCH_INDEX_SIGNATURES,
            STATUS_OK,
            outcome,
            |_reply| Ok(()),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
