//! Error taxonomy shared by every management operation.
//!
//! Callers branch on [`ErrorKind`], never on raw status codes or message
//! substrings. The mapping from server wording to kind lives in ordered
//! [`SignatureTable`] values supplied per endpoint family as data, so the
//! classification engine is written once.

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Closed set of domain error kinds produced by response classification.
///
/// Every endpoint's classifier maps onto this set. New kinds may be added in
/// a minor release (the enum is `#[non_exhaustive]`), but existing variants
/// and their meanings are a stable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The named resource does not exist on the cluster.
    #[error("requested resource was not found")]
    NotFound,

    /// The resource exists but is not yet fully provisioned.
    #[error("resource exists but is not yet ready")]
    NotReady,

    /// Creation was rejected because the resource already exists.
    #[error("resource already exists")]
    AlreadyExists,

    /// The server rejected the caller's credentials or permissions.
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// The request was structurally invalid and was rejected before any
    /// network effect.
    #[error("invalid request argument")]
    InvalidArgument,

    /// Catch-all for protocol-level failures: unexpected status codes,
    /// unparseable error bodies, or server messages matching no signature.
    #[error("internal or protocol failure")]
    Internal,

    /// The transport could not complete the exchange.
    #[error("network failure")]
    Network,

    /// The transport gave up after the request's timeout elapsed.
    #[error("operation timed out")]
    Timeout,

    /// The caller cancelled the in-flight request.
    #[error("operation was cancelled")]
    Cancelled,
}

// ---------------------------------------------------------------------------
// Signature tables
// ---------------------------------------------------------------------------

/// A textual pattern bound to the kind it selects.
///
/// Patterns are matched by substring containment against the server's error
/// message. The literal strings are a compatibility surface pinned to exact
/// server wording; changing one is a behavioral change and must come with an
/// updated regression fixture.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub pattern: &'static str,
    pub kind: ErrorKind,
}

impl Signature {
    #[must_use]
    pub const fn new(pattern: &'static str, kind: ErrorKind) -> Self {
        Self { pattern, kind }
    }
}

/// Ordered list of [`Signature`] entries for one endpoint family.
///
/// Evaluation order is semantic: entries are checked front to back and the
/// first match wins, so more specific patterns must precede broader ones.
#[derive(Debug, Clone, Copy)]
pub struct SignatureTable {
    entries: &'static [Signature],
}

impl SignatureTable {
    #[must_use]
    pub const fn new(entries: &'static [Signature]) -> Self {
        Self { entries }
    }

    /// Map a server error message onto a kind.
    ///
    /// Falls through to [`ErrorKind::Internal`] when no entry matches.
    #[must_use]
    pub fn classify(&self, message: &str) -> ErrorKind {
        self.entries
            .iter()
            .find(|sig| message.contains(sig.pattern))
            .map_or(ErrorKind::Internal, |sig| sig.kind)
    }

    #[must_use]
    pub fn entries(&self) -> &'static [Signature] {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: SignatureTable = SignatureTable::new(&[
        Signature::new("index not found", ErrorKind::NotFound),
        Signature::new("no planPIndexes for indexName", ErrorKind::NotReady),
    ]);

    #[test]
    fn first_match_wins_over_later_entries() {
        // Crafted message containing both patterns; the earlier entry decides.
        let msg = "index not found: no planPIndexes for indexName foo";
        assert_eq!(TABLE.classify(msg), ErrorKind::NotFound);

        const REORDERED: SignatureTable = SignatureTable::new(&[
            Signature::new("no planPIndexes for indexName", ErrorKind::NotReady),
            Signature::new("index not found", ErrorKind::NotFound),
        ]);
        assert_eq!(REORDERED.classify(msg), ErrorKind::NotReady);
    }

    #[test]
    fn no_match_falls_through_to_internal() {
        assert_eq!(TABLE.classify("service temporarily unavailable"), ErrorKind::Internal);
        assert_eq!(TABLE.classify(""), ErrorKind::Internal);
    }

    #[test]
    fn substring_containment_not_equality() {
        let msg = "rest_auth: preparePerms, err: index not found (ix 7)";
        assert_eq!(TABLE.classify(msg), ErrorKind::NotFound);
    }

    #[test]
    fn empty_table_always_internal() {
        let empty = SignatureTable::new(&[]);
        assert_eq!(empty.classify("index not found"), ErrorKind::Internal);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Classification is total: any message produces a kind drawn
            /// from the table plus the internal fallback.
            #[test]
            fn classify_is_total_and_closed(message in ".*") {
                let kind = TABLE.classify(&message);
                prop_assert!(matches!(
                    kind,
                    ErrorKind::NotFound | ErrorKind::NotReady | ErrorKind::Internal
                ));
            }

            /// Classifying the same message twice yields the same kind.
            #[test]
            fn classify_is_deterministic(message in ".*") {
                prop_assert_eq!(TABLE.classify(&message), TABLE.classify(&message));
            }
        }
    }
}
