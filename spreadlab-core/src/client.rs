//! Backtest preview API client.
//!
//! Issues a single `GET /api/backtest/spread/{address}/{date}/{pct}` against
//! the backend and decodes the preview payload. No retries and no local
//! recovery: failures map into [`BacktestError`] and propagate to the caller.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::context::SimulationContext;
use crate::param::SpreadPercentage;
use crate::preview::PreviewResult;

/// Structured failures of a preview fetch.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// Non-2xx response. The message carries the status reason phrase.
    #[error("backtest fetch failed with status: {reason}")]
    Status { code: u16, reason: String },

    #[error("network error: {0}")]
    Network(String),

    /// Response body missing required fields or not valid JSON.
    #[error("malformed preview response: {0}")]
    MalformedResponse(String),
}

/// Blocking HTTP client for the spread backtest endpoint.
pub struct BacktestClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl BacktestClient {
    /// Default origin when the backend is co-hosted during development.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// The request path for a preview, exactly as the backend routes it:
    /// `/api/backtest/spread/{address}/{YYYY-MM-DD}/{pct}`.
    ///
    /// The address is embedded as-is; no additional encoding is applied.
    pub fn preview_path(address: &str, start_date: NaiveDate, pct: SpreadPercentage) -> String {
        format!(
            "/api/backtest/spread/{address}/{}/{pct}",
            start_date.format("%Y-%m-%d")
        )
    }

    /// The full URL for a preview fetch against this client's backend.
    pub fn preview_url(&self, ctx: &SimulationContext, pct: SpreadPercentage) -> String {
        format!(
            "{}{}",
            self.base_url,
            Self::preview_path(&ctx.address, ctx.start_date, pct)
        )
    }

    /// Fetch one preview. Exactly one request; the caller decides what a
    /// failure means.
    pub fn fetch_preview(
        &self,
        ctx: &SimulationContext,
        pct: SpreadPercentage,
    ) -> Result<PreviewResult, BacktestError> {
        let url = self.preview_url(ctx, pct);

        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| BacktestError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BacktestError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        resp.json::<PreviewResult>()
            .map_err(|e| BacktestError::MalformedResponse(e.to_string()))
    }
}
