//! Wire-document boundary: parsed response bodies with typed field access.
//!
//! Error bodies from the management APIs are small JSON objects. This module
//! wraps `serde_json` parsing behind a narrow extraction interface so the
//! classification engine can pull named fields without caring about the
//! parser; extraction failures carry the field name for diagnostics.

use serde_json::Value;

/// Errors produced while parsing or reading a wire document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("body is not a valid document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("field `{field}` is missing")]
    FieldMissing { field: &'static str },

    #[error("field `{field}` is not a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// A parsed response body with typed field extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse raw body bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the bytes are not valid JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let root = serde_json::from_slice(bytes)?;
        Ok(Self { root })
    }

    /// Raw access to a top-level field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.root.get(field)
    }

    /// Extract a top-level string field.
    ///
    /// # Errors
    ///
    /// Returns `FieldMissing` if the field is absent, `TypeMismatch` if it is
    /// present but not a string.
    pub fn str_field(&self, field: &'static str) -> Result<&str, DocumentError> {
        let value = self
            .root
            .get(field)
            .ok_or(DocumentError::FieldMissing { field })?;
        value.as_str().ok_or(DocumentError::TypeMismatch {
            field,
            expected: "string",
        })
    }

    /// Extract a top-level unsigned integer field.
    ///
    /// # Errors
    ///
    /// Returns `FieldMissing` if the field is absent, `TypeMismatch` if it is
    /// present but not an unsigned integer.
    pub fn u64_field(&self, field: &'static str) -> Result<u64, DocumentError> {
        let value = self
            .root
            .get(field)
            .ok_or(DocumentError::FieldMissing { field })?;
        value.as_u64().ok_or(DocumentError::TypeMismatch {
            field,
            expected: "unsigned integer",
        })
    }

    /// Consume the document, yielding the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }
}
