//! Simulation context — the ambient values that key a preview fetch.
//!
//! The hosting application decides which treasury address and simulation
//! start date the whole card list operates on. Rather than reading them from
//! shared mutable state, the context is passed explicitly into whatever
//! performs the fetch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Read-only context shared by all product cards in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationContext {
    /// Opaque treasury address identifier, embedded in the request path as-is.
    pub address: String,
    /// Simulation start date. Only the calendar date travels on the wire.
    pub start_date: NaiveDate,
}

impl SimulationContext {
    pub fn new(address: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            address: address.into(),
            start_date,
        }
    }

    /// Build a context from a full UTC timestamp, truncating to the calendar
    /// date. The backend path segment carries only `YYYY-MM-DD`, never the
    /// time-of-day part.
    pub fn from_timestamp(address: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::new(address, instant.date_naive())
    }

    /// The start date as an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub fn start_date_iso(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }
}
