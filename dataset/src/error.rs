use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("hub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the hub, message taken from the hub's own
    /// error body.
    #[error("hub returned {status}: {message}")]
    Hub { status: u16, message: String },

    #[error("split '{split}' not found in dataset '{dataset}'")]
    UnknownSplit { dataset: String, split: String },

    #[error("failed to decode hub response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("openwebtext stream not initialized; call init_openwebtext first")]
    NotInitialized,
}
