//! Dashboard wiring for the OHLCV price/volume panes.
//!
//! This crate handles:
//! - Loading datasets and rendering both charts
//! - Zoom, resize and hover interaction
//! - Range badge and user-visible notices
//! - Logging initialization

pub mod dashboard;
pub mod logging;
pub mod notice;
pub mod range;

pub use dashboard::{Dashboard, LoadOutcome};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use notice::Notice;
pub use range::{range_badge, INTERVAL_LABEL};
