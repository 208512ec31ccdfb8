//! Historical multi-factor dataset generation.
//!
//! Factors are produced in dependency order so each step reads only series
//! that already exist:
//!
//! ```text
//! rainfall ──┬──────────────▶ irrigation ──▶ fertilizer ──┐
//! temperature│                                ▲           │
//! soil ──────┼────────────────────────────────┘           ▼
//! pest ──────┴──────────────────────────────────────────▶ yield
//! ```

mod historical;

pub use historical::{HistoricalConfig, HistoricalSeriesGenerator};
