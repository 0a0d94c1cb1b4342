//! HTTP holiday source.
//!
//! GETs a flat JSON object of `{ "yyyy-MM-dd": "name", ... }`.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use super::source::HolidaySource;
use crate::error::{Error, Result};

/// Public Japanese holiday list used when no endpoint is configured.
pub const DEFAULT_HOLIDAY_ENDPOINT: &str = "https://holidays-jp.github.io/api/v1/date.json";

/// Holiday source backed by an HTTP endpoint.
pub struct HttpHolidaySource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpHolidaySource {
    /// Create a source for `endpoint` with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns `HolidayFetch` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::HolidayFetch(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HolidaySource for HttpHolidaySource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch_holidays(&self) -> Result<BTreeMap<String, String>> {
        debug!(endpoint = %self.endpoint, "Fetching holidays");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::HolidayFetch(format!("request to {} failed: {e}", self.endpoint)))?;

        if !response.status().is_success() {
            return Err(Error::HolidayFetch(format!(
                "{} returned HTTP {}",
                self.endpoint,
                response.status()
            )));
        }

        response
            .json::<BTreeMap<String, String>>()
            .await
            .map_err(|e| Error::HolidayFetch(format!("unexpected response body: {e}")))
    }
}
