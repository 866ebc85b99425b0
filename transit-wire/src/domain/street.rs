//! Street types.

use std::fmt;

/// Error returned when parsing an unknown street leg.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid street leg: {0:?}")]
pub struct InvalidStreetLeg(pub String);

/// The part of a street, if the street is split into more than one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreetLeg {
    North,
    East,
    South,
    West,
}

impl StreetLeg {
    /// Parse a street leg.
    ///
    /// Accepts the full word in any case (`"North"`, `"north"`) or the
    /// single-letter abbreviation used in query parameters (`"N"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_wire::domain::StreetLeg;
    ///
    /// assert_eq!(StreetLeg::parse("East").unwrap(), StreetLeg::East);
    /// assert_eq!(StreetLeg::parse("w").unwrap(), StreetLeg::West);
    /// assert!(StreetLeg::parse("Up").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidStreetLeg> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Self::North),
            "east" | "e" => Ok(Self::East),
            "south" | "s" => Ok(Self::South),
            "west" | "w" => Ok(Self::West),
            _ => Err(InvalidStreetLeg(s.to_string())),
        }
    }

    /// Returns the full name, as used in response payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        }
    }

    /// Returns the single-letter abbreviation used in query parameters.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
        }
    }
}

impl fmt::Display for StreetLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A street, as identified in the transit dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Street {
    /// Unique key of the street within the dataset
    pub key: u32,

    /// Street name; more or less verbose depending on the requested usage
    pub name: String,

    /// Street type, e.g. "Avenue" or "Road"
    pub street_type: Option<String>,

    /// Which part of a split street this is
    pub leg: Option<StreetLeg>,
}

impl Street {
    /// Create a street without a type or leg.
    pub fn new(key: u32, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            street_type: None,
            leg: None,
        }
    }

    /// Set the street type.
    pub fn with_type(mut self, street_type: impl Into<String>) -> Self {
        self.street_type = Some(street_type.into());
        self
    }

    /// Set the street leg.
    pub fn with_leg(mut self, leg: StreetLeg) -> Self {
        self.leg = Some(leg);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_names() {
        assert_eq!(StreetLeg::parse("North").unwrap(), StreetLeg::North);
        assert_eq!(StreetLeg::parse("EAST").unwrap(), StreetLeg::East);
        assert_eq!(StreetLeg::parse("south").unwrap(), StreetLeg::South);
        assert_eq!(StreetLeg::parse("West").unwrap(), StreetLeg::West);
    }

    #[test]
    fn parse_abbreviations() {
        assert_eq!(StreetLeg::parse("N").unwrap(), StreetLeg::North);
        assert_eq!(StreetLeg::parse("e").unwrap(), StreetLeg::East);
    }

    #[test]
    fn reject_unknown_leg() {
        let err = StreetLeg::parse("not a valid street leg").unwrap_err();
        assert_eq!(err.to_string(), "invalid street leg: \"not a valid street leg\"");
        assert!(StreetLeg::parse("").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        for leg in [
            StreetLeg::North,
            StreetLeg::East,
            StreetLeg::South,
            StreetLeg::West,
        ] {
            assert_eq!(StreetLeg::parse(leg.as_str()).unwrap(), leg);
            assert_eq!(StreetLeg::parse(leg.abbreviation()).unwrap(), leg);
        }
    }

    #[test]
    fn builder() {
        let street = Street::new(2265, "Portage Avenue")
            .with_type("Avenue")
            .with_leg(StreetLeg::East);

        assert_eq!(street.key, 2265);
        assert_eq!(street.street_type.as_deref(), Some("Avenue"));
        assert_eq!(street.leg, Some(StreetLeg::East));
    }
}
