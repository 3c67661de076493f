use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mcversion::VersionClient;
use mcversion::config::ClientConfig;

#[derive(Parser)]
#[command(name = "mcversion")]
#[command(version, about = "Query the launcher version manifest")]
struct Cli {
    /// JSON config file (manifestUrl, manifestV2Url, timeoutMs, concurrency)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of concurrent detail fetches
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version manifest
    Manifest {
        /// Use the v2 manifest (with sha1 and compliance level)
        #[arg(long)]
        v2: bool,
    },
    /// Print the detail of the latest release or snapshot
    Latest {
        #[arg(long)]
        snapshot: bool,
    },
    /// Print the detail of one version
    Version { id: String },
    /// Fetch every version detail concurrently
    All {
        /// Print only id and type of each version
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Serialize)]
struct Summary<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcversion=info")),
        )
        .with_writer(writer)
        .init();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if cli.concurrency.is_some() {
        config.concurrency = cli.concurrency;
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    let client = VersionClient::new(&config)?;

    let output = match command {
        Command::Manifest { v2: false } => serde_json::to_string_pretty(&client.manifest().await?)?,
        Command::Manifest { v2: true } => {
            serde_json::to_string_pretty(&client.manifest_v2().await?)?
        }
        Command::Latest { snapshot: false } => {
            serde_json::to_string_pretty(&client.latest_release().await?)?
        }
        Command::Latest { snapshot: true } => {
            serde_json::to_string_pretty(&client.latest_snapshot().await?)?
        }
        Command::Version { id } => serde_json::to_string_pretty(&client.version(&id).await?)?,
        Command::All { summary } => {
            let details = client.all_versions().await?;
            if summary {
                let rows: Vec<_> = details
                    .iter()
                    .map(|d| Summary {
                        id: &d.id,
                        kind: d.kind.as_str(),
                    })
                    .collect();
                serde_json::to_string_pretty(&rows)?
            } else {
                serde_json::to_string_pretty(&details)?
            }
        }
    };

    println!("{}", output);
    Ok(())
}
