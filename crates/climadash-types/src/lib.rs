//! Data types for the temperature and humidity readings API.
//!
//! This crate provides the shared data model used by the client library
//! (climadash-core) and the command-line/terminal front ends.
//!
//! # Features
//!
//! - [`Reading`]: one timestamped sample with four numeric channels
//! - [`RawReading`]: the wire shape, with every field optional
//! - [`DailyAggregate`]: per-day channel averages
//! - [`Page`]: one page of the paginated readings endpoint
//! - Month helpers bridging 0-based month indices and [`time::Month`]
//!
//! # Example
//!
//! ```
//! use climadash_types::{RawReading, Reading};
//!
//! let raw = RawReading {
//!     id: Some("abc".into()),
//!     date: Some("2024-05-01T10:00:00Z".into()),
//!     internal_temperature: Some(21.5),
//!     external_temperature: Some(14.0),
//!     internal_humidity: Some(48.0),
//!     external_humidity: Some(71.0),
//! };
//! let reading = Reading::try_from(raw).unwrap();
//! assert_eq!(reading.id, "abc");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    DailyAggregate, Page, RawReading, Reading, month_from_index0, month_index0, month_name,
    parse_month, parse_timestamp,
};
