//! Domain error types.
//!
//! These errors represent validation failures in the value types themselves.
//! They are distinct from wire decoding errors, which wrap them when a
//! payload carries an invalid value.

use super::LocationKind;

/// Domain-level errors for validation and projection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside -90..=90
    #[error("latitude {0} is out of range (-90..=90)")]
    LatitudeOutOfRange(f64),

    /// Longitude outside -180..=180
    #[error("longitude {0} is out of range (-180..=180)")]
    LongitudeOutOfRange(f64),

    /// NaN or infinite coordinate
    #[error("coordinate must be a finite number")]
    NonFiniteCoordinate,

    /// Bounds whose minimum lies beyond their maximum
    #[error("bounds minimum exceeds maximum")]
    InvertedBounds,

    /// A time span that ends before it starts
    #[error("times end before they start")]
    EndsBeforeStart,

    /// Hour or minute outside a 24-hour clock
    #[error("invalid clock time {hour:02}:{minute:02}")]
    InvalidClockTime { hour: u8, minute: u8 },

    /// A projection needed a geographic centre the location doesn't have
    #[error("{0} location has no geographic centre")]
    MissingCentre(LocationKind),
}
