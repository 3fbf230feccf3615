//! Hover synchronisation between the price and volume charts.
//!
//! A pointer move on either chart highlights the same bar on both: the
//! reference lines move to the bar's open and volume, both axis pointers are
//! re-asserted and both y-axis badges follow. Pointer moves that the widgets
//! emit while the synchronizer is itself dispatching are echoes and are dropped.

use crate::adapter::ChartAdapter;
use crate::price::{self, TooltipContent};
use crate::widget::{ChartWidget, WidgetEvent};
use ohlcv_core::{AxisEvent, AxisValue, Bar, HoverState, Pane, Window};
use tracing::{debug, trace};

/// Phase of the current pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// Nothing highlighted.
    #[default]
    Idle,
    /// Bar at this absolute index is highlighted.
    Hovering(usize),
    /// Synthetic pointer updates for this index are being pushed.
    Dispatching(usize),
}

/// Result of handling one widget notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both charts now highlight the bar at this absolute index.
    Updated(usize),
    /// Hover indicators were cleared.
    Cleared,
    /// The event did not resolve to a bar; nothing changed.
    Ignored,
    /// Echo of a synthetic dispatch; dropped.
    Suppressed,
}

/// Counters for synchronizer activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub updates: u64,
    pub clears: u64,
    pub ignored: u64,
    pub echoes_suppressed: u64,
    /// Deepest nesting of hover updates observed. Never exceeds 1.
    pub max_depth: usize,
}

/// Owns both chart adapters and the shared hover state.
pub struct HoverSynchronizer<W: ChartWidget> {
    price: ChartAdapter<W>,
    volume: ChartAdapter<W>,
    bars: Vec<Bar>,
    state: HoverState,
    phase: SyncPhase,
    depth: usize,
    stats: SyncStats,
}

impl<W: ChartWidget> HoverSynchronizer<W> {
    /// Bind two adapters to the full bar sequence they display.
    pub fn new(price: ChartAdapter<W>, volume: ChartAdapter<W>, bars: Vec<Bar>) -> Self {
        Self {
            price,
            volume,
            bars,
            state: HoverState::default(),
            phase: SyncPhase::Idle,
            depth: 0,
            stats: SyncStats::default(),
        }
    }

    /// Handle a notification emitted by the chart on `source`.
    pub fn handle(&mut self, source: Pane, event: WidgetEvent) -> SyncOutcome {
        if let SyncPhase::Dispatching(_) = self.phase {
            self.stats.echoes_suppressed += 1;
            trace!(?source, "echo suppressed");
            return SyncOutcome::Suppressed;
        }

        match event {
            WidgetEvent::PointerMove(axis) => match self.resolve_index(source, &axis) {
                Some(index) => {
                    self.hover(index);
                    SyncOutcome::Updated(index)
                }
                None => {
                    self.stats.ignored += 1;
                    SyncOutcome::Ignored
                }
            },
            WidgetEvent::PointerLeave | WidgetEvent::Finished => {
                self.clear();
                SyncOutcome::Cleared
            }
        }
    }

    /// Replace the bar sequence after a reload. Any hover is cleared.
    pub fn rebind(&mut self, bars: Vec<Bar>) {
        self.bars = bars;
        self.clear();
    }

    /// Show `window` of the bound sequence on both charts.
    pub fn update_window(&mut self, window: Window) {
        self.price.update_window(&self.bars, window);
        self.volume.update_window(&self.bars, window);
    }

    /// Re-layout both charts.
    pub fn resize(&mut self) {
        self.price.resize();
        self.volume.resize();
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Tooltip for the hovered bar.
    pub fn tooltip(&self) -> Option<TooltipContent> {
        let bar = self.bars.get(self.state.index?)?;
        Some(price::tooltip(bar))
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Full bar sequence indices refer to.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn adapter(&self, pane: Pane) -> &ChartAdapter<W> {
        match pane {
            Pane::Price => &self.price,
            Pane::Volume => &self.volume,
        }
    }

    pub fn adapter_mut(&mut self, pane: Pane) -> &mut ChartAdapter<W> {
        match pane {
            Pane::Price => &mut self.price,
            Pane::Volume => &mut self.volume,
        }
    }

    /// Absolute bar index named by the event's x-axis entry.
    ///
    /// Numeric values are category positions within the source chart's
    /// visible window. Labels are looked up in the full date sequence.
    fn resolve_index(&self, source: Pane, axis: &AxisEvent) -> Option<usize> {
        let index = match &axis.x()?.value {
            AxisValue::Number(v) => {
                if !v.is_finite() || *v < 0.0 || v.fract() != 0.0 {
                    return None;
                }
                (*v as usize).checked_add(self.adapter(source).offset())?
            }
            AxisValue::Category(label) => self.bars.iter().position(|b| b.date == *label)?,
        };
        (index < self.bars.len()).then_some(index)
    }

    fn hover(&mut self, index: usize) {
        let Some(bar) = self.bars.get(index) else {
            return;
        };
        self.state = HoverState::from_bar(index, bar);

        self.price.apply_hover(&self.state);
        self.volume.apply_hover(&self.state);

        self.phase = SyncPhase::Dispatching(index);
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        for pane in [Pane::Price, Pane::Volume] {
            let Some(value) = self.state.value_for(pane) else {
                continue;
            };
            let Some((x, y)) = self.adapter(pane).pointer_position(index, value) else {
                continue;
            };
            let echoes = self.adapter_mut(pane).dispatch_pointer(x, y);
            for echo in echoes {
                self.handle(pane, echo);
            }
        }
        self.depth -= 1;
        self.phase = SyncPhase::Hovering(index);

        for pane in [Pane::Price, Pane::Volume] {
            let value = self.state.value_for(pane);
            let adapter = self.adapter_mut(pane);
            adapter.sync_bar_width();
            adapter.show_badge(value);
        }

        self.stats.updates += 1;
        trace!(index, "hover synced");
    }

    fn clear(&mut self) {
        let was_active = self.state.is_active();
        self.state.clear();
        self.phase = SyncPhase::Idle;
        for pane in [Pane::Price, Pane::Volume] {
            let adapter = self.adapter_mut(pane);
            adapter.set_reference_line(None);
            adapter.hide_badge();
        }
        self.stats.clears += 1;
        if was_active {
            debug!("hover cleared");
        }
    }
}
