use anyhow::Context;
use cairn_client::{CairnClient, ClientConfig};
use cairn_core::prelude::*;
use cairn_view::prelude::*;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cairn")]
#[command(about = "List the data assets stored for your address")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API URL
    #[arg(short, long, env = "CAIRN_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Version suffix of the endpoints, e.g. "/v1"
    #[arg(long, env = "CAIRN_API_VERSION", default_value = "")]
    api_version: String,

    /// Native auth token
    #[arg(short, long, env = "CAIRN_TOKEN")]
    token: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List every data asset with its current manifest
    List,
    /// Print the update request of one listed data asset as JSON
    Update {
        /// Position in the output of `list`
        position: usize,
    },
    /// Fetch and display a raw manifest by content id
    Manifest { cid: String },
}

fn format_timestamp(parsed: Option<DateTime<Utc>>, raw: &str) -> String {
    parsed
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn print_view(view: &AssetView) {
    match view.render() {
        Rendered::Busy => println!("⏳ Loading..."),
        Rendered::Message(message) => println!("{message}"),
        Rendered::Cards(cards) => {
            for card in cards {
                let stream = card.data_stream();
                let nested = if stream.marshal_manifest.nested_stream {
                    ", nested"
                } else {
                    ""
                };
                println!(
                    "[{}] {} by {} ({} items{nested})",
                    card.position, stream.name, stream.creator, stream.marshal_manifest.total_items,
                );
                println!(
                    "    created {}, modified {}",
                    format_timestamp(stream.created_at(), &stream.created_on),
                    format_timestamp(stream.last_modified_at(), &stream.last_modified_on),
                );
                println!(
                    "    {} (manifest {}, folder {})",
                    card.document.manifest_file_name,
                    card.document.manifest_cid,
                    card.document.folder_cid
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = CairnClient::new(ClientConfig {
        base_url: cli.url.clone(),
        api_version: cli.api_version.clone(),
    });
    let credential = Credential::new(cli.token.clone());

    match cli.command {
        Commands::List => {
            println!("🔍 Fetching data assets from {}...", cli.url);
            let mut session = AssetSession::new(client, credential, TracingNotifier);
            let view = session.mount().await?;
            print_view(view);
        }
        Commands::Update { position } => {
            let mut session = AssetSession::new(client, credential, TracingNotifier);
            session.mount().await?;
            let request = session
                .select(position)
                .with_context(|| format!("No data asset at position {position}"))?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Commands::Manifest { cid } => {
            println!("🔍 Fetching manifest '{cid}'...");
            let manifest = client.download_manifest(&credential, &cid).await?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
    }

    Ok(())
}
