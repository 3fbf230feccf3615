//! Dashboard controller: dataset loading, chart wiring and interaction.

use crate::notice::Notice;
use crate::range::range_badge;
use ohlcv_chart::{
    ChartAdapter, ChartWidget, HoverSynchronizer, ResizeDebouncer, SyncOutcome, TooltipContent, WidgetEvent,
};
use ohlcv_core::format::{fmt_date_label, MISSING};
use ohlcv_core::{Config, Error, Pane, Result, Window};
use ohlcv_ingestion::{load_rows, DatasetRegistry, InlineSource, LoadGenerations, LoadTicket, Normalizer, RowSource};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Charts show the dataset.
    Rendered { asset_key: String, bars: usize },
    /// Nothing to render; an error notice is shown.
    Failed,
    /// A newer request superseded this one; the payload was discarded.
    Stale,
}

/// Price and volume charts driven by one dataset at a time.
pub struct Dashboard<S: RowSource, W: ChartWidget> {
    config: Config,
    registry: DatasetRegistry,
    inline: InlineSource,
    source: S,
    generations: LoadGenerations,
    window: Window,
    /// Widgets waiting for the first successful load.
    pending: Option<(W, W)>,
    sync: Option<HoverSynchronizer<W>>,
    debouncer: ResizeDebouncer,
    notice: Option<Notice>,
    range: String,
    asset_key: Option<String>,
}

impl<S: RowSource, W: ChartWidget> Dashboard<S, W> {
    /// Validate `config` and take ownership of the two chart widgets.
    pub fn new(config: Config, source: S, price: W, volume: W) -> Result<Self> {
        config.validate()?;
        let registry = DatasetRegistry::new(&config.data)?;
        let debouncer = ResizeDebouncer::from_millis(config.resize.debounce_ms);
        Ok(Self {
            config,
            registry,
            inline: InlineSource::none(),
            source,
            generations: LoadGenerations::new(),
            window: Window::full(),
            pending: Some((price, volume)),
            sync: None,
            debouncer,
            notice: None,
            range: MISSING.to_string(),
            asset_key: None,
        })
    }

    /// Use embedded JSON in preference to fetched files.
    pub fn with_inline(mut self, inline: InlineSource) -> Self {
        self.inline = inline;
        self
    }

    /// Fetch, normalize and render the dataset for `asset_key`.
    ///
    /// Never fails: problems end up in [`Dashboard::notice`].
    pub async fn load_and_render(&mut self, asset_key: &str) -> LoadOutcome {
        let ticket = self.begin_load(asset_key);
        let raw = self.fetch(&ticket).await;
        self.complete_load(&ticket, raw)
    }

    /// Start a load request. Unknown keys resolve to the default asset.
    pub fn begin_load(&mut self, asset_key: &str) -> LoadTicket {
        let key = self.registry.resolve(asset_key).key.clone();
        if key != asset_key {
            warn!(requested = asset_key, resolved = %key, "unknown asset key");
        }
        self.notice = Some(Notice::loading(&key));
        self.generations.begin(key)
    }

    /// Raw payload for a ticket: inline JSON, else the dataset file.
    pub async fn fetch(&self, ticket: &LoadTicket) -> Option<Value> {
        let url = self.registry.url(&ticket.asset_key);
        load_rows(&self.inline, &self.source, &url).await
    }

    /// Render a fetched payload, unless a newer request was started.
    pub fn complete_load(&mut self, ticket: &LoadTicket, raw: Option<Value>) -> LoadOutcome {
        if !self.generations.is_current(ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.generations.latest(),
                asset = %ticket.asset_key,
                "discarding stale load"
            );
            return LoadOutcome::Stale;
        }

        let mut normalizer = Normalizer::new(self.config.data.tuple_layout);
        let bars = raw.as_ref().map(|v| normalizer.normalize(v)).unwrap_or_default();
        if bars.is_empty() {
            let err = Error::empty_dataset(format!(
                "no valid rows for '{}'; check the JSON schema and values",
                ticket.asset_key
            ));
            warn!(asset = %ticket.asset_key, error = %err, "nothing to render");
            self.notice = Some(Notice::from(&err));
            return LoadOutcome::Failed;
        }

        let count = bars.len();
        let span = (fmt_date_label(&bars[0].date), fmt_date_label(&bars[count - 1].date));
        if let Some((price, volume)) = self.pending.take() {
            let price = ChartAdapter::price(price, &bars, &self.config);
            let volume = ChartAdapter::volume(volume, &bars, &self.config);
            self.sync = Some(HoverSynchronizer::new(price, volume, bars));
        } else if let Some(sync) = self.sync.as_mut() {
            sync.rebind(bars);
        }
        if let Some(sync) = self.sync.as_mut() {
            sync.update_window(self.window);
        }

        self.refresh_range();
        self.notice = None;
        self.asset_key = Some(ticket.asset_key.clone());
        info!(asset = %ticket.asset_key, bars = count, first = %span.0, last = %span.1, "charts rendered");
        LoadOutcome::Rendered {
            asset_key: ticket.asset_key.clone(),
            bars: count,
        }
    }

    /// Forward a chart notification to the hover synchronizer.
    pub fn on_pointer(&mut self, pane: Pane, event: WidgetEvent) -> SyncOutcome {
        match self.sync.as_mut() {
            Some(sync) => sync.handle(pane, event),
            None => SyncOutcome::Ignored,
        }
    }

    /// Apply a zoom window to both charts. Returns the new range badge.
    pub fn on_zoom(&mut self, window: Window) -> &str {
        self.window = window;
        if let Some(sync) = self.sync.as_mut() {
            sync.update_window(window);
        }
        self.refresh_range();
        &self.range
    }

    /// Record a container resize.
    pub fn on_resize(&mut self, now: Instant) {
        self.debouncer.notify(now);
    }

    /// Resize both charts once a resize burst has settled. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        if let Some(sync) = self.sync.as_mut() {
            sync.resize();
            debug!("charts resized");
        }
        true
    }

    /// Tooltip for the hovered bar, if any.
    pub fn tooltip(&self) -> Option<TooltipContent> {
        self.sync.as_ref()?.tooltip()
    }

    /// Last user-visible notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Visible range badge.
    pub fn range_badge(&self) -> &str {
        &self.range
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Asset currently rendered.
    pub fn asset_key(&self) -> Option<&str> {
        self.asset_key.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Bound charts, once a dataset has rendered.
    pub fn synchronizer(&self) -> Option<&HoverSynchronizer<W>> {
        self.sync.as_ref()
    }

    fn refresh_range(&mut self) {
        self.range = match &self.sync {
            Some(sync) => {
                let dates: Vec<&str> = sync.bars().iter().map(|b| b.date.as_str()).collect();
                range_badge(&dates, self.window)
            }
            None => MISSING.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohlcv_chart::{HeadlessWidget, Rect, SyncPhase};
    use ohlcv_core::AxisEvent;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Default)]
    struct MapSource {
        files: HashMap<String, Value>,
    }

    impl MapSource {
        fn with(mut self, url: &str, value: Value) -> Self {
            self.files.insert(url.to_string(), value);
            self
        }
    }

    impl RowSource for MapSource {
        async fn fetch(&self, url: &str) -> Result<Value> {
            self.files
                .get(url)
                .cloned()
                .ok_or_else(|| Error::fetch(format!("{url}: not found")))
        }
    }

    fn rows(n: usize, base: f64) -> Value {
        let rows: Vec<Value> = (0..n)
            .map(|i| {
                let p = base + i as f64;
                json!([format!("2025-09-{:02}", i + 1), p, p + 2.0, p - 1.0, p + 1.0, 1000 * (i + 1)])
            })
            .collect();
        Value::Array(rows)
    }

    fn widget() -> HeadlessWidget {
        HeadlessWidget::new(Rect::new(40.0, 10.0, 600.0, 400.0))
    }

    fn dashboard(source: MapSource) -> Dashboard<MapSource, HeadlessWidget> {
        Dashboard::new(Config::default(), source, widget(), widget()).unwrap()
    }

    fn price_option(dash: &Dashboard<MapSource, HeadlessWidget>) -> Value {
        dash.synchronizer().unwrap().adapter(Pane::Price).widget().option().clone()
    }

    #[tokio::test]
    async fn test_first_load_renders_both_charts() {
        let source = MapSource::default().with("./data/mantra_60days.json", rows(10, 1.0));
        let mut dash = dashboard(source);

        let outcome = dash.load_and_render("mantra").await;
        assert_eq!(
            outcome,
            LoadOutcome::Rendered {
                asset_key: "mantra".to_string(),
                bars: 10
            }
        );
        assert_eq!(dash.notice(), None);
        assert_eq!(dash.range_badge(), "10 Days (09/01–09/10)");

        let sync = dash.synchronizer().unwrap();
        assert_eq!(sync.adapter(Pane::Volume).widget().category_count(), 10);
        assert_eq!(price_option(&dash)["series"][0]["type"], "candlestick");
    }

    #[tokio::test]
    async fn test_switch_updates_in_place() {
        let source = MapSource::default()
            .with("./data/mantra_60days.json", rows(10, 1.0))
            .with("./data/stock_b_60days.json", rows(4, 50.0));
        let mut dash = dashboard(source);
        dash.load_and_render("mantra").await;
        dash.on_pointer(Pane::Price, WidgetEvent::PointerMove(AxisEvent::at_index(3.0)));

        let outcome = dash.load_and_render("stock-b").await;
        assert!(matches!(outcome, LoadOutcome::Rendered { bars: 4, .. }));
        assert_eq!(dash.asset_key(), Some("stock-b"));

        let sync = dash.synchronizer().unwrap();
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(sync.bars()[0].open, 50.0);
        let option = price_option(&dash);
        assert_eq!(option["xAxis"][0]["data"].as_array().map(Vec::len), Some(4));
        // Styling from the first init survives the update.
        assert_eq!(option["series"][0]["itemStyle"]["color"], "#0FA76C");
    }

    #[tokio::test]
    async fn test_unknown_key_uses_default_dataset() {
        let source = MapSource::default().with("./data/mantra_60days.json", rows(3, 1.0));
        let mut dash = dashboard(source);
        let outcome = dash.load_and_render("doge").await;
        assert!(matches!(outcome, LoadOutcome::Rendered { ref asset_key, .. } if asset_key == "mantra"));
    }

    #[tokio::test]
    async fn test_missing_file_shows_error_notice() {
        let mut dash = dashboard(MapSource::default());
        assert_eq!(dash.load_and_render("stock-a").await, LoadOutcome::Failed);
        assert!(dash.notice().is_some_and(Notice::is_error));
        assert!(dash.synchronizer().is_none());
        assert_eq!(dash.range_badge(), MISSING);
    }

    #[tokio::test]
    async fn test_all_rows_invalid_shows_error_notice() {
        let source = MapSource::default()
            .with("./data/mantra_60days.json", json!([["2024-01-01", "x", 2, 1, 3, 100]]));
        let mut dash = dashboard(source);
        assert_eq!(dash.load_and_render("mantra").await, LoadOutcome::Failed);
        assert!(dash.notice().unwrap().to_string().contains("mantra"));
    }

    #[tokio::test]
    async fn test_inline_json_takes_precedence() {
        let inline = InlineSource::new(rows(2, 7.0).to_string());
        let mut dash = dashboard(MapSource::default()).with_inline(inline);
        let outcome = dash.load_and_render("stock-c").await;
        assert!(matches!(outcome, LoadOutcome::Rendered { bars: 2, .. }));
        assert_eq!(dash.synchronizer().unwrap().bars()[1].open, 8.0);
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let source = MapSource::default()
            .with("./data/mantra_60days.json", rows(10, 1.0))
            .with("./data/stock_a_60days.json", rows(5, 20.0));
        let mut dash = dashboard(source);

        let first = dash.begin_load("mantra");
        let second = dash.begin_load("stock-a");
        let first_raw = dash.fetch(&first).await;
        let second_raw = dash.fetch(&second).await;

        assert_eq!(dash.complete_load(&first, first_raw), LoadOutcome::Stale);
        assert!(dash.synchronizer().is_none());
        assert!(matches!(
            dash.complete_load(&second, second_raw),
            LoadOutcome::Rendered { bars: 5, .. }
        ));
        assert_eq!(dash.asset_key(), Some("stock-a"));
    }

    #[tokio::test]
    async fn test_zoom_updates_range_and_charts() {
        let source = MapSource::default().with("./data/mantra_60days.json", rows(11, 1.0));
        let mut dash = dashboard(source);
        dash.load_and_render("mantra").await;

        assert_eq!(dash.on_zoom(Window::from_percent(50.0, 100.0)), "6 Days (09/06–09/11)");
        let sync = dash.synchronizer().unwrap();
        assert_eq!(sync.adapter(Pane::Price).widget().category_count(), 6);
        assert_eq!(sync.adapter(Pane::Volume).offset(), 5);

        // Hover on the zoomed price chart resolves to the absolute bar.
        let outcome = dash.on_pointer(Pane::Price, WidgetEvent::PointerMove(AxisEvent::at_index(0.0)));
        assert_eq!(outcome, SyncOutcome::Updated(5));
        let tooltip = dash.tooltip().unwrap();
        assert_eq!(tooltip.date, "2025/09/06");
        assert_eq!(tooltip.rows[0].label, "OPEN");

        dash.on_pointer(Pane::Price, WidgetEvent::PointerLeave);
        assert_eq!(dash.tooltip(), None);
    }

    #[tokio::test]
    async fn test_resize_is_debounced() {
        let source = MapSource::default().with("./data/mantra_60days.json", rows(3, 1.0));
        let mut dash = dashboard(source);
        dash.load_and_render("mantra").await;

        let t0 = Instant::now();
        dash.on_resize(t0);
        dash.on_resize(t0 + Duration::from_millis(50));
        assert!(!dash.tick(t0 + Duration::from_millis(100)));
        assert!(dash.tick(t0 + Duration::from_millis(200)));
        assert!(!dash.tick(t0 + Duration::from_millis(400)));

        let sync = dash.synchronizer().unwrap();
        assert_eq!(sync.adapter(Pane::Price).widget().resize_count(), 1);
        assert_eq!(sync.adapter(Pane::Volume).widget().resize_count(), 1);
    }

    #[test]
    fn test_pointer_before_load_is_ignored() {
        let mut dash = dashboard(MapSource::default());
        assert_eq!(dash.on_pointer(Pane::Price, WidgetEvent::PointerLeave), SyncOutcome::Ignored);
    }
}
