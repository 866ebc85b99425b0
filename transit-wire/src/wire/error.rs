//! Wire decoding error types.

use std::fmt;

use crate::domain::{DomainError, LocationKind, SegmentKind};

/// What is wrong with a field, relative to the shape a variant requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// A required field is absent (or null)
    Missing,
    /// A field owned by another variant is populated
    Unexpected,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Unexpected => f.write_str("unexpected"),
        }
    }
}

/// Errors from decoding an inbound payload into domain types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The payload isn't JSON, a value has the wrong type, or a value is
    /// outside its domain (e.g. latitude 200)
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The `type` discriminant names no known variant
    #[error("unknown variant {0:?}")]
    UnknownVariant(String),

    /// An untagged object carries none of the variant keys
    #[error("no location variant matched the object's keys")]
    NoVariantMatched,

    /// An untagged object carries more than one variant key
    #[error("object matches more than one variant: {}", .0.join(", "))]
    AmbiguousVariant(Vec<String>),

    /// A tagged location's fields don't fit its declared kind
    #[error("{kind} location has {problem} field `{field}`")]
    FieldMismatch {
        kind: LocationKind,
        field: &'static str,
        problem: FieldProblem,
    },

    /// A segment's fields don't fit its declared kind
    #[error("{kind} segment has {problem} field `{field}`")]
    SegmentShapeMismatch {
        kind: SegmentKind,
        field: &'static str,
        problem: FieldProblem,
    },
}

impl From<DomainError> for DecodeError {
    fn from(err: DomainError) -> Self {
        DecodeError::MalformedPayload(err.to_string())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DecodeError::UnknownVariant("station".into());
        assert_eq!(err.to_string(), "unknown variant \"station\"");

        let err = DecodeError::AmbiguousVariant(vec!["Address".into(), "Point".into()]);
        assert_eq!(
            err.to_string(),
            "object matches more than one variant: Address, Point"
        );

        let err = DecodeError::FieldMismatch {
            kind: LocationKind::Point,
            field: "street",
            problem: FieldProblem::Unexpected,
        };
        assert_eq!(err.to_string(), "point location has unexpected field `street`");

        let err = DecodeError::SegmentShapeMismatch {
            kind: SegmentKind::Ride,
            field: "route",
            problem: FieldProblem::Missing,
        };
        assert_eq!(err.to_string(), "ride segment has missing field `route`");
    }

    #[test]
    fn domain_errors_become_malformed_payload() {
        let err: DecodeError = DomainError::LatitudeOutOfRange(200.0).into();
        assert!(matches!(err, DecodeError::MalformedPayload(msg) if msg.contains("200")));
    }
}
