//! Preview service trait for decoupling the TUI from the HTTP client.
//!
//! The worker talks to this trait, so tests can inject mock implementations
//! and the production binary wraps [`BacktestClient`].

use spreadlab_core::{BacktestClient, BacktestError, PreviewResult, SimulationContext, SpreadPercentage};

/// Abstraction over the backend preview fetch.
pub trait PreviewService: Send + Sync {
    fn fetch_preview(
        &self,
        ctx: &SimulationContext,
        pct: SpreadPercentage,
    ) -> Result<PreviewResult, BacktestError>;
}

/// Production implementation wrapping the blocking HTTP client.
pub struct ClientService {
    client: BacktestClient,
}

impl ClientService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: BacktestClient::new(base_url),
        }
    }
}

impl PreviewService for ClientService {
    fn fetch_preview(
        &self,
        ctx: &SimulationContext,
        pct: SpreadPercentage,
    ) -> Result<PreviewResult, BacktestError> {
        self.client.fetch_preview(ctx, pct)
    }
}
