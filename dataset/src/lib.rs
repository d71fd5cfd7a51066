//! Dataset access for the training pipeline.
//!
//! Wraps the Hugging Face datasets-server API behind [`HubClient`] and keeps
//! the process-wide openwebtext stream behind an explicit, idempotent
//! [`init_openwebtext`], so no network handle is opened as a load-time side
//! effect.

pub mod dataset;
pub mod error;
pub mod hub;

use futures::StreamExt;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OnceCell};

pub use dataset::{Dataset, DatasetInfo, Row};
pub use error::{DatasetError, Result};
pub use hub::{DatasetStream, HubClient, DEFAULT_HUB_BASE, HUB_URL_ENV, PAGE_SIZE};

/// Corpus the entry point keeps ready for the training pipeline.
pub const OPENWEBTEXT_DATASET: &str = "Skylion007/openwebtext";
pub const OPENWEBTEXT_SPLIT: &str = "train";

static DEFAULT_CLIENT: Lazy<HubClient> = Lazy::new(HubClient::new);

static OPENWEBTEXT: OnceCell<Mutex<DatasetStream>> = OnceCell::const_new();

/// Pass-through loader: equivalent to calling [`HubClient::load_dataset`] on
/// the default client with the same arguments. Failures surface unchanged.
pub async fn load_data(name: &str, split: &str) -> Result<Dataset> {
    DEFAULT_CLIENT.load_dataset(name, split).await
}

/// Open the openwebtext train split in streaming mode, exactly once per
/// process. Later calls only report the already-open stream's metadata.
pub async fn init_openwebtext(client: &HubClient) -> Result<DatasetInfo> {
    let cell = OPENWEBTEXT
        .get_or_try_init(|| async {
            let stream = client
                .stream_dataset(OPENWEBTEXT_DATASET, OPENWEBTEXT_SPLIT)
                .await?;
            Ok::<_, DatasetError>(Mutex::new(stream))
        })
        .await?;
    Ok(cell.lock().await.info().clone())
}

/// Pull up to `n` rows from the startup stream.
pub async fn openwebtext_rows(n: usize) -> Result<Vec<Row>> {
    let cell = OPENWEBTEXT.get().ok_or(DatasetError::NotInitialized)?;
    let mut stream = cell.lock().await;
    let mut rows = Vec::with_capacity(n);
    while rows.len() < n {
        match stream.next().await {
            Some(row) => rows.push(row?),
            None => break,
        }
    }
    Ok(rows)
}
