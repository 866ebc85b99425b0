//! Service advisories and their classification.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Service advisory priority, 1 (very high) to 5 (very low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    VeryHigh = 1,
    High = 2,
    #[default]
    Medium = 3,
    Low = 4,
    VeryLow = 5,
}

impl Priority {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryHigh),
            2 => Ok(Self::High),
            3 => Ok(Self::Medium),
            4 => Ok(Self::Low),
            5 => Ok(Self::VeryLow),
            other => Err(other),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Priority::try_from(value)
            .map_err(|v| serde::de::Error::custom(format!("priority {v} is not in 1..=5")))
    }
}

/// Which vehicles a service advisory affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Transit,
    HandiTransit,
    #[default]
    All,
}

impl Category {
    const ALL: [Category; 3] = [Self::Transit, Self::HandiTransit, Self::All];

    /// Parse a category. Advisories send `"Handi-Transit"`, filters use
    /// `"handi-transit"`; both are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transit => "transit",
            Self::HandiTransit => "handi-transit",
            Self::All => "all",
        }
    }
}

/// A notice about service changes, e.g. a detour or a closed stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAdvisory {
    pub key: u32,
    pub priority: Priority,
    pub title: String,
    pub body: String,
    pub category: Category,

    /// Local time of the last update
    pub updated_at: NaiveDateTime,
}

impl ServiceAdvisory {
    /// Returns true if the advisory is at least as urgent as `priority`.
    pub fn is_at_least(&self, priority: Priority) -> bool {
        self.priority <= priority
    }

    /// Returns true if the advisory concerns riders of `category`.
    /// [`Category::All`] on either side matches everything.
    pub fn affects(&self, category: Category) -> bool {
        self.category == Category::All || category == Category::All || self.category == category
    }
}
