//! Preview payload — the `{assets, kpis, data}` object the backend returns.
//!
//! KPI and asset-breakdown shapes belong to the backend contract; this crate
//! relays them without interpreting the schema. Chart data is a label → value
//! map, kept ordered for deterministic rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary metrics for the simulated swap. Opaque: a JSON object relayed
/// as-is, listable entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kpis(pub Map<String, Value>);

/// Portfolio composition after the simulated swap. Opaque like [`Kpis`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetsBreakdown(pub Map<String, Value>);

/// Chart series keyed by label.
pub type ChartData = BTreeMap<String, f64>;

impl Kpis {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AssetsBreakdown {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One complete preview: everything the parent state needs, carried in a
/// single message so partial updates are impossible.
///
/// All three fields are required; a response body missing any of them fails
/// to decode instead of relaying undefined data downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub kpis: Kpis,
    pub assets: AssetsBreakdown,
    pub data: ChartData,
}
