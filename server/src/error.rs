use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("frontend directory does not exist: {}", .0.display())]
    FrontendDirMissing(PathBuf),

    #[error("frontend path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("no index.html in frontend directory: {}", .0.display())]
    IndexMissing(PathBuf),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}
