//! Route, variant and bus types referenced by ride segments.

use std::fmt;

/// A route key, number or badge label.
///
/// Most routes are numbered; rapid-transit lines are named (e.g. `BLUE`).
/// On the wire the two are told apart by value shape alone: an integer
/// (or a string of digits) is a number, anything else is a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKey {
    Number(u32),
    Named(String),
}

impl RouteKey {
    /// Parse a key from its textual form.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_wire::domain::RouteKey;
    ///
    /// assert_eq!(RouteKey::parse("18"), RouteKey::Number(18));
    /// assert_eq!(RouteKey::parse("BLUE"), RouteKey::Named("BLUE".into()));
    /// ```
    pub fn parse(s: &str) -> Self {
        if !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = s.parse()
        {
            return Self::Number(n);
        }
        Self::Named(s.to_string())
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// The type of service provided by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerType {
    Regular,
    Industrial,
    School,
    Charter,
    Work,
}

impl CustomerType {
    const ALL: [CustomerType; 5] = [
        Self::Regular,
        Self::Industrial,
        Self::School,
        Self::Charter,
        Self::Work,
    ];

    /// Parse the wire value (e.g. `"regular"`). Returns `None` if unknown.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Industrial => "industrial",
            Self::School => "school",
            Self::Charter => "charter",
            Self::Work => "work",
        }
    }
}

/// How fully a route services the stops along its segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Services all stops
    Regular,
    /// Services select stops in express segments
    Express,
    /// Services no stops in express segments
    SuperExpress,
    /// Rapid-transit lines
    RapidTransit,
    /// Feeds express and rapid-transit lines
    Feeder,
    /// Feeds express and rapid-transit lines at peak times
    PeakFeeder,
}

impl Coverage {
    const ALL: [Coverage; 6] = [
        Self::Regular,
        Self::Express,
        Self::SuperExpress,
        Self::RapidTransit,
        Self::Feeder,
        Self::PeakFeeder,
    ];

    /// Parse the wire value (e.g. `"super express"`). Returns `None` if unknown.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Express => "express",
            Self::SuperExpress => "super express",
            Self::RapidTransit => "rapid transit",
            Self::Feeder => "feeder",
            Self::PeakFeeder => "peak feeder",
        }
    }
}

/// Colours and CSS classes for a route's badge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeStyle {
    pub class_names: Vec<String>,
    pub background_color: String,
    pub border_color: String,
    pub color: String,
}

/// A variation of a route, distinguished by its intermediate destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub key: String,
    pub name: Option<String>,
}

impl Variant {
    /// Create a variant with a name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
        }
    }
}

/// A route as referenced from a ride segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub key: RouteKey,
    pub number: RouteKey,
    pub name: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub coverage: Option<Coverage>,
    pub badge_label: Option<RouteKey>,
    pub badge_style: Option<BadgeStyle>,
    /// Empty when the payload didn't list variants
    pub variants: Vec<Variant>,
}

impl Route {
    /// Create a route with only its key and number set.
    pub fn new(key: RouteKey) -> Self {
        Self {
            number: key.clone(),
            key,
            name: None,
            customer_type: None,
            coverage: None,
            badge_label: None,
            badge_style: None,
            variants: Vec::new(),
        }
    }

    /// Returns true for rapid-transit lines.
    pub fn is_rapid_transit(&self) -> bool {
        self.coverage == Some(Coverage::RapidTransit) || matches!(self.key, RouteKey::Named(_))
    }
}

/// A landmark the buses on a variant pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub key: u32,
    pub name: String,
}

/// The bus servicing a ride. Usually only known for plans for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bus {
    pub key: u32,
    pub bike_rack: bool,
    pub wifi: bool,
}
