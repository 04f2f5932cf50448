//! Shared preview state, owned above the per-card state.
//!
//! One preview is displayed at a time across all cards. A fetched result is
//! applied as a single message, so the KPI, asset and chart views can never
//! disagree about which run they describe.

use spreadlab_core::{AssetsBreakdown, ChartData, Kpis, PreviewResult};

/// The currently displayed (not-yet-committed) backtest outcome.
#[derive(Debug, Default)]
pub struct PreviewState {
    pub kpis: Option<Kpis>,
    pub assets: Option<AssetsBreakdown>,
    pub chart: Option<ChartData>,
    /// Which product and percentage produced this preview.
    pub label: String,
}

impl PreviewState {
    /// Apply one complete result. Fields update in a fixed order: kpis,
    /// then assets, then chart data.
    pub fn apply(&mut self, result: PreviewResult, label: impl Into<String>) {
        self.kpis = Some(result.kpis);
        self.assets = Some(result.assets);
        self.chart = Some(result.data);
        self.label = label.into();
    }

    /// Clear everything (the card's dismiss control).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_none() && self.assets.is_none() && self.chart.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PreviewResult {
        serde_json::from_str(
            r#"{
                "assets": {"USDC": {"balance": 20000.0}},
                "kpis": {"total value": 12000000.0},
                "data": {"2022-01-01": 100.0}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn apply_populates_all_three_views() {
        let mut state = PreviewState::default();
        assert!(state.is_empty());

        state.apply(sample(), "Stable Anchor @ 20%");
        assert!(state.kpis.is_some());
        assert!(state.assets.is_some());
        assert!(state.chart.is_some());
        assert_eq!(state.label, "Stable Anchor @ 20%");
    }

    #[test]
    fn apply_replaces_the_previous_preview_whole() {
        let mut state = PreviewState::default();
        state.apply(sample(), "first");

        let second: PreviewResult = serde_json::from_str(
            r#"{"assets": {}, "kpis": {"sharpe": 1.0}, "data": {}}"#,
        )
        .unwrap();
        state.apply(second, "second");

        assert_eq!(state.label, "second");
        assert!(state.assets.as_ref().unwrap().is_empty());
        assert_eq!(state.kpis.as_ref().unwrap().entries().count(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = PreviewState::default();
        state.apply(sample(), "x");
        state.reset();
        assert!(state.is_empty());
        assert!(state.label.is_empty());
    }
}
