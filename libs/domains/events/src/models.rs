//! Event domain models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// An event recorded by a monitored host.
///
/// `at` is always emitted as RFC 3339 in UTC. `evt` is usually a short label
/// (`"boot"`, `"shutdown"`), but structured payloads are passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// When the event occurred
    pub at: DateTime<Utc>,

    /// Originating host identifier
    pub host: String,

    /// Event label or payload
    #[schema(value_type = Object)]
    pub evt: serde_json::Value,
}

impl Event {
    pub fn new(at: DateTime<Utc>, host: impl Into<String>, evt: impl Into<serde_json::Value>) -> Self {
        Self {
            at,
            host: host.into(),
            evt: evt.into(),
        }
    }
}

/// Query parameters accepted by `GET /fetch`.
///
/// `from` and `to` are passed to the database untouched; only their presence
/// is checked here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FetchParams {
    /// Inclusive lower bound, e.g. `2024-01-01T00:00:00Z`
    pub from: String,

    /// Inclusive upper bound, e.g. `2024-01-01T23:59:59Z`
    pub to: String,

    /// Only return events from this host; empty means no filter
    #[serde(default)]
    pub host: Option<String>,
}

impl FetchParams {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            host: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// The host filter, with an empty value treated as absent.
    pub fn host_filter(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }
}

/// Parse a timestamp the way the events table accepts them.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (space or `T` separator) and
/// bare dates. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
