//! Concrete management endpoints, grouped by service domain.

pub mod search_index;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::operation::EncodeError;

/// Characters escaped when substituting user data into a path segment.
/// Matches the path-segment set used by the `url` stack: controls,
/// whitespace, URI delimiters, and `%` itself.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape one path segment of endpoint-defined user data.
pub(crate) fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Reject empty required request fields before any network effect.
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> Result<(), EncodeError> {
    if value.is_empty() {
        return Err(EncodeError::EmptyField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through_unchanged() {
        assert_eq!(escape_segment("travel-sample-idx_2"), "travel-sample-idx_2");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(escape_segment("my index/2"), "my%20index%2F2");
        assert_eq!(escape_segment("50%"), "50%25");
        assert_eq!(escape_segment("a?b#c"), "a%3Fb%23c");
    }

    #[test]
    fn require_non_empty_names_the_field() {
        let err = require_non_empty("", "index_name").expect_err("empty rejected");
        assert!(matches!(err, EncodeError::EmptyField { field: "index_name" }));
        assert!(require_non_empty("x", "index_name").is_ok());
    }
}
