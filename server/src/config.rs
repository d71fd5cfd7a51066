use std::path::PathBuf;

use crate::error::ServerError;

/// Runtime configuration, resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the built frontend. Must contain `index.html`.
    pub frontend_dir: PathBuf,
    /// Address to bind, `host:port`.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Fail-fast startup check: the frontend directory must exist and hold
    /// an `index.html` before anything binds. The error carries the
    /// offending path so a misconfigured value is visible in the diagnostic.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.frontend_dir.exists() {
            return Err(ServerError::FrontendDirMissing(self.frontend_dir.clone()));
        }
        if !self.frontend_dir.is_dir() {
            return Err(ServerError::NotADirectory(self.frontend_dir.clone()));
        }
        if !self.frontend_dir.join("index.html").is_file() {
            return Err(ServerError::IndexMissing(self.frontend_dir.clone()));
        }
        Ok(())
    }
}
