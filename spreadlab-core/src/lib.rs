//! Spreadlab Core — domain types and the backend preview contract.
//!
//! This crate contains everything a frontend needs to request a spread
//! backtest preview:
//! - Product display metadata and the default catalog
//! - The simulation context (treasury address + start date) that keys a fetch
//! - Validated spread percentage parsing
//! - The preview payload relayed from the backend (`{assets, kpis, data}`)
//! - The blocking HTTP client for `GET /api/backtest/spread/...`
//!
//! The backtest computation itself lives behind the backend endpoint and is
//! opaque here: this crate builds the request, maps failures into a typed
//! error, and hands the parsed payload back untouched.

pub mod client;
pub mod context;
pub mod param;
pub mod preview;
pub mod product;

pub use client::{BacktestClient, BacktestError};
pub use context::SimulationContext;
pub use param::{ParamError, SpreadPercentage};
pub use preview::{AssetsBreakdown, ChartData, Kpis, PreviewResult};
pub use product::ProductDescription;
