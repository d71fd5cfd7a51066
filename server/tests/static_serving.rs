//! Integration tests for frontend serving: fail-fast startup validation and
//! the HTTP surface (index route, assets, SPA fallback, traversal).

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use chatapp_server::{bind_with_port_fallback, frontend_router, ServerConfig, ServerError};
use tempfile::tempdir;

// A placeholder literal that once shipped in place of a real path.
const PLACEHOLDER: &str = "<h1>Frontend build directory path here</h1>";

#[test]
fn placeholder_literal_is_rejected_at_startup() {
    let config = ServerConfig {
        frontend_dir: PathBuf::from(PLACEHOLDER),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ServerError::FrontendDirMissing(_)));
    // The diagnostic must name the bogus value, not swallow it.
    assert!(err.to_string().contains(PLACEHOLDER));
}

#[test]
fn directory_without_index_is_rejected() {
    let dir = tempdir().unwrap();
    let config = ServerConfig {
        frontend_dir: dir.path().to_path_buf(),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    assert!(matches!(
        config.validate(),
        Err(ServerError::IndexMissing(_))
    ));
}

#[test]
fn file_as_frontend_dir_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("dist");
    std::fs::write(&file, "not a directory").unwrap();
    let config = ServerConfig {
        frontend_dir: file,
        bind_addr: "127.0.0.1:0".to_string(),
    };
    assert!(matches!(
        config.validate(),
        Err(ServerError::NotADirectory(_))
    ));
}

const INDEX_BODY: &str = "<html><body>chat app</body></html>";

fn build_frontend() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_BODY).unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/app.js"), "console.log('hi');").unwrap();
    std::fs::write(dir.path().join("assets/app.css"), "body{margin:0}").unwrap();
    dir
}

async fn spawn_site(root: PathBuf) -> SocketAddr {
    let app = frontend_router(root);
    let (listener, addr) = bind_with_port_fallback("127.0.0.1:0").await.unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

#[tokio::test]
async fn serves_index_at_root() {
    let dir = build_frontend();
    let addr = spawn_site(dir.path().to_path_buf()).await;

    let resp = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(resp.text().await.unwrap(), INDEX_BODY);
}

#[tokio::test]
async fn serves_assets_with_content_types() {
    let dir = build_frontend();
    let addr = spawn_site(dir.path().to_path_buf()).await;

    let js = reqwest::get(format!("http://{}/assets/app.js", addr))
        .await
        .unwrap();
    assert_eq!(js.status(), 200);
    assert_eq!(
        js.headers()["content-type"].to_str().unwrap(),
        "application/javascript; charset=utf-8"
    );
    assert_eq!(js.text().await.unwrap(), "console.log('hi');");

    let css = reqwest::get(format!("http://{}/assets/app.css", addr))
        .await
        .unwrap();
    assert_eq!(css.status(), 200);
    assert_eq!(
        css.headers()["content-type"].to_str().unwrap(),
        "text/css; charset=utf-8"
    );
}

#[tokio::test]
async fn unknown_path_falls_back_to_index() {
    let dir = build_frontend();
    let addr = spawn_site(dir.path().to_path_buf()).await;

    let resp = reqwest::get(format!("http://{}/chat/42", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(resp.text().await.unwrap(), INDEX_BODY);
}

#[tokio::test]
async fn traversal_cannot_escape_the_bundle() {
    // Bundle lives in a subdirectory; the secret sits one level above it.
    let parent = tempdir().unwrap();
    let bundle = parent.path().join("dist");
    std::fs::create_dir(&bundle).unwrap();
    std::fs::write(bundle.join("index.html"), INDEX_BODY).unwrap();
    std::fs::write(parent.path().join("secret.txt"), "top secret").unwrap();

    let addr = spawn_site(bundle).await;

    // Raw request: an HTTP client would normalize the dot segments away.
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /../secret.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 404"), "got: {}", raw);
    assert!(!raw.contains("top secret"));
}
