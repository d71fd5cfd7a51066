//! HTTP client for the Hugging Face datasets-server API.
//!
//! Two access modes, mirroring the hub's own:
//! - [`HubClient::load_dataset`] fetches every row of a split up front.
//! - [`HubClient::stream_dataset`] yields rows incrementally, pulling
//!   fixed-size pages from the hub only as the consumer polls.

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, Stream, TryStreamExt};
use serde::Deserialize;
use tracing::debug;

use crate::dataset::{Dataset, DatasetInfo, Row};
use crate::error::{DatasetError, Result};

/// Public datasets-server endpoint.
pub const DEFAULT_HUB_BASE: &str = "https://datasets-server.huggingface.co";

/// Rows fetched per request when paginating a split.
pub const PAGE_SIZE: u64 = 100;

/// Environment override for the hub endpoint, for tests and mirrors.
pub const HUB_URL_ENV: &str = "DATASET_HUB_URL";

#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
    num_rows_total: u64,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: Row,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    dataset_info: InfoBody,
}

#[derive(Debug, Deserialize)]
struct InfoBody {
    splits: HashMap<String, SplitInfo>,
}

#[derive(Debug, Deserialize)]
struct SplitInfo {
    num_examples: u64,
}

#[derive(Debug, Deserialize)]
struct HubErrorBody {
    error: String,
}

impl Default for HubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HubClient {
    /// Client against the public hub, or the `DATASET_HUB_URL` override.
    pub fn new() -> Self {
        let base = std::env::var(HUB_URL_ENV).unwrap_or_else(|_| DEFAULT_HUB_BASE.to_string());
        Self::with_base_url(base)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Split metadata, via the hub's `/info` endpoint.
    pub async fn dataset_info(&self, name: &str, split: &str) -> Result<DatasetInfo> {
        let resp = self
            .http
            .get(format!("{}/info", self.base_url))
            .query(&[("dataset", name), ("config", "default")])
            .send()
            .await?;
        let resp = check(resp).await?;
        let text = resp.text().await?;
        let info: InfoResponse = serde_json::from_str(&text)?;
        let split_info =
            info.dataset_info
                .splits
                .get(split)
                .ok_or_else(|| DatasetError::UnknownSplit {
                    dataset: name.to_string(),
                    split: split.to_string(),
                })?;
        Ok(DatasetInfo {
            name: name.to_string(),
            split: split.to_string(),
            num_rows: split_info.num_examples,
            streaming: false,
        })
    }

    /// Fetch the whole split eagerly, paginating until the hub's reported
    /// total is reached.
    pub async fn load_dataset(&self, name: &str, split: &str) -> Result<Dataset> {
        let mut rows: Vec<Row> = Vec::new();
        let mut offset = 0u64;
        loop {
            let page = self.fetch_rows(name, split, offset, PAGE_SIZE).await?;
            let fetched = page.rows.len() as u64;
            rows.extend(page.rows.into_iter().map(|entry| entry.row));
            offset += fetched;
            if fetched == 0 || offset >= page.num_rows_total {
                break;
            }
        }
        debug!(dataset = name, split, rows = rows.len(), "loaded split");
        Ok(Dataset {
            name: name.to_string(),
            split: split.to_string(),
            rows,
        })
    }

    /// Open the split in streaming mode. One `/info` call validates the
    /// dataset and records the row count; row pages are fetched only as the
    /// returned stream is polled.
    pub async fn stream_dataset(&self, name: &str, split: &str) -> Result<DatasetStream> {
        let mut info = self.dataset_info(name, split).await?;
        info.streaming = true;
        debug!(dataset = name, split, num_rows = info.num_rows, "opened dataset stream");

        let client = self.clone();
        let name = name.to_string();
        let split = split.to_string();
        let total = info.num_rows;
        let pages = stream::try_unfold(0u64, move |offset| {
            let client = client.clone();
            let name = name.clone();
            let split = split.clone();
            async move {
                if offset >= total {
                    return Ok(None);
                }
                let page = client.fetch_rows(&name, &split, offset, PAGE_SIZE).await?;
                let fetched = page.rows.len() as u64;
                if fetched == 0 {
                    return Ok(None);
                }
                let batch: Vec<Row> = page.rows.into_iter().map(|entry| entry.row).collect();
                Ok::<_, DatasetError>(Some((batch, offset + fetched)))
            }
        });
        let rows = pages
            .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<Row, DatasetError>)))
            .try_flatten();
        Ok(DatasetStream {
            info,
            inner: Box::pin(rows),
        })
    }

    async fn fetch_rows(&self, name: &str, split: &str, offset: u64, length: u64) -> Result<RowsPage> {
        debug!(dataset = name, split, offset, "fetching rows page");
        let resp = self
            .http
            .get(format!("{}/rows", self.base_url))
            .query(&[
                ("dataset", name.to_string()),
                ("config", "default".to_string()),
                ("split", split.to_string()),
                ("offset", offset.to_string()),
                ("length", length.to_string()),
            ])
            .send()
            .await?;
        let resp = check(resp).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Turn a non-success hub response into a typed error carrying the hub's
/// own status and message.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<HubErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(DatasetError::Hub {
        status: status.as_u16(),
        message,
    })
}

/// Incremental view of a split; yields rows in hub order.
pub struct DatasetStream {
    info: DatasetInfo,
    inner: Pin<Box<dyn Stream<Item = Result<Row>> + Send>>,
}

impl std::fmt::Debug for DatasetStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetStream")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl DatasetStream {
    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }
}

impl Stream for DatasetStream {
    type Item = Result<Row>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
