use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use chatapp_server::{bind_with_port_fallback, frontend_router, ServerConfig, ServerError};

#[derive(Parser)]
#[command(name = "chatapp-server")]
#[command(version)]
#[command(about = "Serves the built frontend bundle over HTTP")]
struct Cli {
    /// Directory containing the frontend build output (index.html + assets).
    #[arg(long, env = "FRONTEND_DIR", default_value = "../frontend/dist")]
    frontend_dir: PathBuf,

    /// Address to listen on. If the port is taken, the next 9 are tried.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3001")]
    bind_addr: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let config = ServerConfig {
        frontend_dir: cli.frontend_dir,
        bind_addr: cli.bind_addr,
    };
    config.validate()?;

    let app = frontend_router(config.frontend_dir.clone());
    let (listener, bound_addr) =
        bind_with_port_fallback(&config.bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_addr.clone(),
                source,
            })?;

    info!(addr = %bound_addr, frontend = %config.frontend_dir.display(), "serving frontend");
    axum::serve(listener, app).await?;
    Ok(())
}
