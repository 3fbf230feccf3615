//! Dataset sources: embedded inline JSON and fetched files.
//!
//! Fetch and parse failures never propagate past [`load_rows`]; they are
//! logged and reported as an absent payload so the caller can fall back.

use ohlcv_core::{Error, Result};
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Something that can fetch a dataset payload by URL.
pub trait RowSource {
    /// Fetch and parse the payload at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// Fetches dataset files from a local directory.
#[derive(Debug, Clone)]
pub struct FsRowSource {
    root: PathBuf,
}

impl FsRowSource {
    /// Resolve relative URLs against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches("./"))
    }
}

impl RowSource for FsRowSource {
    async fn fetch(&self, url: &str) -> Result<Value> {
        let path = self.resolve(url);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::fetch(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text).map_err(|e| Error::parse(format!("{url}: {e}")))
    }
}

/// Optional JSON embedded in the host page.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    text: Option<String>,
}

impl InlineSource {
    /// Inline payload text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// No inline payload.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parsed payload, when present, non-empty and valid JSON.
    pub fn read(&self) -> Option<Value> {
        let text = self.text.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        match serde_json::from_str(text) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "failed to parse inline OHLCV JSON");
                None
            }
        }
    }
}

/// Load raw rows: inline JSON when it parses to an array, otherwise `url`.
///
/// Returns `None` when neither source yields a payload.
pub async fn load_rows<S: RowSource>(inline: &InlineSource, source: &S, url: &str) -> Option<Value> {
    if let Some(value) = inline.read().filter(Value::is_array) {
        info!("using inline OHLCV JSON");
        return Some(value);
    }

    info!(url, "fetching dataset");
    match source.fetch(url).await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(url, error = %e, "dataset fetch failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_read() {
        assert_eq!(InlineSource::new(" [1, 2] ").read(), Some(json!([1, 2])));
        assert_eq!(InlineSource::new("   ").read(), None);
        assert_eq!(InlineSource::new("{broken").read(), None);
        assert_eq!(InlineSource::none().read(), None);
    }

    #[tokio::test]
    async fn test_fs_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rows.json"), r#"[["2024-01-02", 1, 2, 0.5, 1.5, 10]]"#).unwrap();

        let source = FsRowSource::new(dir.path());
        let value = source.fetch("./rows.json").await.unwrap();
        assert_eq!(value[0][0], json!("2024-01-02"));

        let root = dir.path().to_path_buf();
        dir.close().unwrap();
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_fs_fetch_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "not json").unwrap();

        let source = FsRowSource::new(dir.path());
        assert!(matches!(source.fetch("missing.json").await, Err(Error::Fetch(_))));
        assert!(matches!(source.fetch("bad.json").await, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_rows_prefers_inline_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rows.json"), "[]").unwrap();
        let source = FsRowSource::new(dir.path());

        let inline = InlineSource::new(r#"[["2024-01-02", 1, 2, 0.5, 1.5, 10]]"#);
        let rows = load_rows(&inline, &source, "rows.json").await.unwrap();
        assert_eq!(rows.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_load_rows_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rows.json"), "[]").unwrap();
        let source = FsRowSource::new(dir.path());

        // Broken and non-array inline payloads fall through to the file.
        let rows = load_rows(&InlineSource::new("{oops"), &source, "rows.json").await;
        assert_eq!(rows, Some(json!([])));
        let rows = load_rows(&InlineSource::new(r#"{"a": 1}"#), &source, "rows.json").await;
        assert_eq!(rows, Some(json!([])));

        // Fetch failure is an absent payload.
        let rows = load_rows(&InlineSource::none(), &source, "nope.json").await;
        assert_eq!(rows, None);
    }
}
