use clap::Parser;
use tracing::info;

use chatapp_dataset::{
    init_openwebtext, openwebtext_rows, DatasetError, HubClient, DEFAULT_HUB_BASE,
};

#[derive(Parser)]
#[command(name = "chatapp-dataset")]
#[command(version)]
#[command(about = "Opens the openwebtext stream and loads dataset splits from the hub")]
struct Cli {
    /// Extra dataset to load eagerly once the openwebtext stream is ready.
    #[arg(long)]
    dataset: Option<String>,

    /// Split to load for --dataset.
    #[arg(long, default_value = "train")]
    split: String,

    /// Print the first N rows from the openwebtext stream.
    #[arg(long)]
    take: Option<usize>,

    /// Hub endpoint override.
    #[arg(long, env = "DATASET_HUB_URL", default_value = DEFAULT_HUB_BASE)]
    hub_url: String,
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

async fn run(cli: Cli) -> Result<(), DatasetError> {
    let client = HubClient::with_base_url(cli.hub_url);

    let opened = init_openwebtext(&client).await?;
    println!("{}", opened);

    if let Some(n) = cli.take {
        for row in openwebtext_rows(n).await? {
            println!("{}", row);
        }
    }

    if let Some(name) = cli.dataset {
        let ds = client.load_dataset(&name, &cli.split).await?;
        info!(dataset = %ds.name, split = %ds.split, rows = ds.len(), "loaded");
        println!("{} [{}]: {} rows", ds.name, ds.split, ds.len());
    }

    Ok(())
}
