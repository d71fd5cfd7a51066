//! Library facade for the frontend server exposing testable helpers.
//!
//! Config validation and the router are factored out of `main.rs` so the
//! binary and the integration tests share one implementation without
//! compiling the server twice.

pub mod config;
pub mod error;
pub mod static_files;

pub use config::ServerConfig;
pub use error::ServerError;
pub use static_files::{bind_with_port_fallback, frontend_router};
