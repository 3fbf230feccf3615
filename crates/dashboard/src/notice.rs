//! User-visible status notices.

use ohlcv_core::Error;
use std::fmt;

/// Status shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A dataset load is in flight.
    Loading {
        asset_key: String,
    },
    /// Non-blocking error panel.
    Error(String),
}

impl Notice {
    pub fn loading(asset_key: impl Into<String>) -> Self {
        Notice::Loading {
            asset_key: asset_key.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        Notice::Error(err.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loading { asset_key } => write!(f, "Loading {asset_key}…"),
            Notice::Error(message) => write!(f, "Error: {message}"),
        }
    }
}
