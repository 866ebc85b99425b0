//! Transit API data model and wire encoding.
//!
//! Validated domain types for locations, stops, schedules, routes, service
//! advisories and trip plans, with codecs for the transit API's two
//! conventions for polymorphic entities (tagged by a `type` field, or keyed
//! by variant name) and builders for outbound filters and queries.

pub mod domain;
pub mod query;
pub mod settings;
pub mod source;
pub mod wire;
