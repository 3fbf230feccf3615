//! Data ingestion and normalization for the OHLCV chart panes.
//!
//! This crate handles:
//! - Raw row normalization (tuple and record rows)
//! - Zoom window slicing
//! - Dataset lookup by asset key
//! - Inline and fetched data sources
//! - Load generations for dataset switching

pub mod generation;
pub mod normalize;
pub mod registry;
pub mod source;
pub mod window;

pub use generation::{LoadGenerations, LoadTicket};
pub use normalize::{normalize, normalize_with, NormalizeStats, Normalizer, RowShape};
pub use registry::DatasetRegistry;
pub use source::{load_rows, FsRowSource, InlineSource, RowSource};
pub use window::{index_range, slice};
