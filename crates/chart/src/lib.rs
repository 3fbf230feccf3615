//! Chart panes for OHLCV data.
//!
//! This crate handles:
//! - The chart widget interface and a headless implementation
//! - Price (candlestick) and volume pane options
//! - Chart adapters binding options to widgets
//! - Y-axis value badges
//! - Hover synchronisation between the two panes
//! - Resize debouncing

pub mod adapter;
pub mod badge;
pub mod debounce;
pub mod headless;
pub mod price;
pub mod sync;
pub mod volume;
pub mod widget;

mod style;

pub use adapter::ChartAdapter;
pub use badge::{BadgeLayout, BadgeStyle, YAxisBadge};
pub use debounce::ResizeDebouncer;
pub use headless::HeadlessWidget;
pub use price::{TooltipContent, TooltipRow};
pub use sync::{HoverSynchronizer, SyncOutcome, SyncPhase, SyncStats};
pub use widget::{AxisExtent, AxisRef, ChartWidget, OptionMode, Rect, WidgetEvent};
