//! Render a dataset into headless charts and print the option documents.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ohlcv_chart::{volume, HeadlessWidget, Rect, TooltipContent, WidgetEvent};
use ohlcv_core::{AxisEvent, Config, Pane, Window};
use ohlcv_dashboard::{init_logging, Dashboard, LoadOutcome, LogConfig, INTERVAL_LABEL};
use ohlcv_ingestion::{slice, FsRowSource, InlineSource};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ohlcv-render", about = "Render OHLCV price and volume chart options")]
struct Args {
    /// Asset key (defaults to the configured default asset).
    asset: Option<String>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the dataset files.
    #[arg(long)]
    data_dir: Option<String>,

    /// Visible window as start and end fractions.
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    window: Option<Vec<f64>>,

    /// File with inline rows, used instead of the dataset file.
    #[arg(long)]
    inline: Option<PathBuf>,

    /// Hover the bar at this position within the visible window.
    #[arg(long)]
    hover: Option<usize>,

    /// Plot width in pixels.
    #[arg(long, default_value_t = 960.0)]
    width: f64,
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    asset: &'a str,
    interval: &'static str,
    range: &'a str,
    /// Visible volume axis labels, empty where hidden.
    volume_axis_labels: Vec<String>,
    /// Tooltip for the hovered bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<TooltipContent>,
    price: &'a Value,
    volume: &'a Value,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&LogConfig::from_env())?;

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data.data_dir = dir;
        config.validate()?;
    }

    let window = match args.window.as_deref() {
        None => Window::full(),
        Some(&[start, end]) if (0.0..=1.0).contains(&start) && start <= end && end <= 1.0 => {
            Window::new(start, end)
        }
        Some(other) => bail!("--window expects 0 <= START <= END <= 1, got {other:?}"),
    };

    let inline = match &args.inline {
        Some(path) => InlineSource::new(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => InlineSource::none(),
    };

    let asset = args
        .asset
        .unwrap_or_else(|| config.data.default_asset.clone());
    let layout = &config.layout;
    let price = HeadlessWidget::new(Rect::new(60.0, layout.price_top, args.width, layout.price_height));
    let volume = HeadlessWidget::new(Rect::new(60.0, layout.volume_top, args.width, layout.volume_height));

    let mut dashboard = Dashboard::new(config, FsRowSource::new("."), price, volume)?.with_inline(inline);
    match dashboard.load_and_render(&asset).await {
        LoadOutcome::Rendered { asset_key, bars } => {
            info!(asset = %asset_key, bars, "rendered");
        }
        LoadOutcome::Failed | LoadOutcome::Stale => {
            let notice = dashboard
                .notice()
                .map(ToString::to_string)
                .unwrap_or_else(|| "load did not complete".to_string());
            bail!(notice);
        }
    }
    dashboard.on_zoom(window);
    if let Some(index) = args.hover {
        let event = WidgetEvent::PointerMove(AxisEvent::at_index(index as f64));
        let outcome = dashboard.on_pointer(Pane::Price, event);
        info!(index, ?outcome, "hover");
    }

    let Some(sync) = dashboard.synchronizer() else {
        bail!("charts were not initialised");
    };
    let output = RenderOutput {
        asset: dashboard.asset_key().unwrap_or(&asset),
        interval: INTERVAL_LABEL,
        range: dashboard.range_badge(),
        volume_axis_labels: volume::axis_labels(
            slice(sync.bars(), dashboard.window()),
            dashboard.config().layout.date_label_every,
        ),
        tooltip: dashboard.tooltip(),
        price: sync.adapter(Pane::Price).widget().option(),
        volume: sync.adapter(Pane::Volume).widget().option(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
