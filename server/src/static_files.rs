//! Static file serving for the built frontend bundle.
//!
//! `/` maps to the bundle's `index.html` and `/*file` to files under the
//! configured root. Unknown paths fall back to `index.html` so client-side
//! routing survives a hard refresh.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::debug;

/// Build the router serving a validated frontend directory.
pub fn frontend_router(root: PathBuf) -> Router {
    let root = Arc::new(root);
    Router::new()
        .route("/", get(index_handler))
        .route("/*file", get(asset_handler))
        .with_state(root)
}

/// Bind the configured address, walking up to 9 subsequent ports if the
/// requested one is taken.
pub async fn bind_with_port_fallback(addr: &str) -> std::io::Result<(TcpListener, SocketAddr)> {
    let base: SocketAddr = addr.parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid bind address '{}': {}", addr, e),
        )
    })?;
    let start_port = base.port();
    for port in start_port..start_port.saturating_add(10) {
        let mut candidate = base;
        candidate.set_port(port);
        match TcpListener::bind(candidate).await {
            Ok(listener) => {
                let bound = listener.local_addr()?;
                return Ok((listener, bound));
            }
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::AddrInUse,
        "all fallback ports in use",
    ))
}

async fn index_handler(State(root): State<Arc<PathBuf>>) -> Response {
    serve_file_path(root.join("index.html"), "text/html; charset=utf-8").await
}

async fn asset_handler(State(root): State<Arc<PathBuf>>, UrlPath(file): UrlPath<String>) -> Response {
    let rel = file.trim_start_matches('/');
    // Never resolve outside the bundle root.
    if Path::new(rel)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return not_found(rel);
    }
    let path = root.join(rel);
    match tokio::fs::read(&path).await {
        Ok(bytes) => file_response(bytes, content_type_for(&path)),
        Err(_) => {
            // SPA fallback: the frontend router owns unknown paths
            debug!(path = rel, "not a file, serving index.html");
            serve_file_path(root.join("index.html"), "text/html; charset=utf-8").await
        }
    }
}

async fn serve_file_path(path: PathBuf, content_type: &'static str) -> Response {
    match tokio::fs::read(&path).await {
        Ok(bytes) => file_response(bytes, content_type),
        Err(_) => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from(format!("Not found: {}", path.display())))
            .unwrap(),
    }
}

fn file_response(bytes: Vec<u8>, content_type: &'static str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap()
}

fn not_found(path: &str) -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from(format!("Not found: {}", path)))
        .unwrap()
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
