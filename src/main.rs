//! Docker Hub Collector — Binary Entrypoint
//! Fetches the metadata of one Docker Hub repository and prints one JSON
//! line per emitted item.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dockerhub_collector::{config, runner, DockerHub, DockerHubClient, CATEGORY_DOCKERHUB_DATA};

const BACKEND_NAME: &str = "dockerhub";

#[derive(Parser, Debug)]
#[command(
    name = "dockerhub-collector",
    version,
    about = "Fetch repository metadata (pulls, stars, description) from Docker Hub"
)]
struct Cli {
    /// Docker Hub owner; `_` is shorthand for the official `library` owner
    owner: String,

    /// Docker Hub repository owned by `owner`
    repository: String,

    /// Label attached to emitted items (defaults to the origin URL)
    #[arg(long)]
    tag: Option<String>,

    /// Category of items to fetch
    #[arg(long, default_value = CATEGORY_DOCKERHUB_DATA)]
    category: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let cfg = config::load_default()?;
    let client = DockerHubClient::from_config(&cfg)?;
    let source = DockerHub::with_client(&cli.owner, &cli.repository, cli.tag.as_deref(), client);

    let items = runner::run_once(BACKEND_NAME, &source, &cli.category).await?;
    for item in &items {
        println!("{}", serde_json::to_string(item)?);
    }

    Ok(())
}
