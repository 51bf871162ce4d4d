//! Tag scopes understood by the tag-name endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TempoError;

/// Backend partition of tag namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagScope {
    Intrinsic,
    Span,
    Resource,
}

impl TagScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagScope::Intrinsic => "intrinsic",
            TagScope::Span => "span",
            TagScope::Resource => "resource",
        }
    }

    /// Parse an optional scope string; empty means every scope.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<TagScope>, TempoError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for TagScope {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intrinsic" => Ok(TagScope::Intrinsic),
            "span" => Ok(TagScope::Span),
            "resource" => Ok(TagScope::Resource),
            other => Err(TempoError::InvalidArgument(format!(
                "unknown tag scope '{}': expected intrinsic, span or resource",
                other
            ))),
        }
    }
}

impl fmt::Display for TagScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional() {
        assert_eq!(TagScope::parse_optional(None).unwrap(), None);
        assert_eq!(TagScope::parse_optional(Some("")).unwrap(), None);
        assert_eq!(
            TagScope::parse_optional(Some("resource")).unwrap(),
            Some(TagScope::Resource)
        );
        assert!(TagScope::parse_optional(Some("Span")).is_err()); // Case sensitive
        assert!(TagScope::parse_optional(Some("event")).is_err());
    }
}
