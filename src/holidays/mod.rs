//! Public holiday cache.
//!
//! Holidays are fetched once from a remote [`HolidaySource`] and cached in
//! the store; later calls read the cache only.
//!
//! # Submodules
//!
//! - [`source`] - Source trait
//! - [`http`] - HTTP source (`reqwest`)
//! - [`cache`] - Fetch-once population

pub mod cache;
pub mod http;
pub mod source;

pub use cache::{PopulateOutcome, populate_if_empty};
pub use http::{DEFAULT_HOLIDAY_ENDPOINT, HttpHolidaySource};
pub use source::HolidaySource;
