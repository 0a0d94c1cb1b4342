//! Holiday source trait.
//!
//! A source returns the raw `date → name` map. Dates are not validated
//! here; the cache drops entries it cannot parse.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::Result;

/// Trait for remote holiday lists.
///
/// Implemented by [`HttpHolidaySource`](super::HttpHolidaySource); tests use
/// in-memory fakes.
pub trait HolidaySource: Send + Sync {
    /// Short description for logs (usually the endpoint).
    fn describe(&self) -> String;

    /// Fetch every known holiday as `yyyy-MM-dd → name`.
    fn fetch_holidays(&self) -> impl Future<Output = Result<BTreeMap<String, String>>> + Send;
}
