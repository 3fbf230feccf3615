//! Core types and configuration for the OHLCV chart panes.
//!
//! This crate provides shared types used across all other crates:
//! - Daily bars, zoom windows and hover state
//! - Axis pointer events emitted by chart widgets
//! - Configuration structures
//! - Display formatting helpers
//! - Common error types

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::{Config, TupleLayout};
pub use error::{Error, Result};
pub use types::*;
