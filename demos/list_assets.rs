//! # List Assets Example
//!
//! Mounts a session against a running index and prints the resolved data assets.
//!
//! ## Usage
//!
//! ```sh
//! CAIRN_TOKEN=... cargo run --example list_assets --features "full"
//! ```

use cairn::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let token = env::var("CAIRN_TOKEN")?;
    let client = CairnClient::new(ClientConfig::default());

    let mut session = AssetSession::new(client, Credential::new(token), TracingNotifier);
    let view = session.mount().await?;

    match view.render() {
        Rendered::Busy => println!("Still loading"),
        Rendered::Message(message) => println!("{message}"),
        Rendered::Cards(cards) => {
            for card in cards {
                println!("{}: {}", card.position, card.data_stream().name);
            }
        }
    }

    // The update action for the first asset, as the upload page would receive it.
    if let Some(request) = session.select(0) {
        println!("{}", serde_json::to_string_pretty(&request)?);
    }

    Ok(())
}
