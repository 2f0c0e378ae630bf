//! ContextHub MCP server.
//!
//! Main entry point: reads configuration from flags and environment, then
//! serves MCP over stdio until the client disconnects. Stdout carries the
//! protocol, so every diagnostic goes to stderr.

use anyhow::Result;
use clap::Parser;
use contexthub_api::{ApiClient, DEFAULT_API_URL};
use contexthub_mcp::McpServer;
use contexthub_server::ContextHub;

/// ContextHub MCP server - manage prompts, documents, and collections
#[derive(Parser)]
#[command(name = "contexthub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// ContextHub API base URL
    #[arg(long, env = "CONTEXTHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

// One invocation suspends only on its backend call(s); a single-threaded
// runtime is all the concurrency this server has use for.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let api_key = match std::env::var("CONTEXTHUB_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("Error: CONTEXTHUB_API_KEY environment variable is not set.");
            eprintln!();
            eprintln!("Generate an API key in ContextHub under Settings > API Keys,");
            eprintln!("then export it before starting the server:");
            eprintln!();
            eprintln!("    export CONTEXTHUB_API_KEY=ch_your_key_here");
            std::process::exit(1);
        }
    };

    tracing::info!(api_url = %cli.api_url, "starting ContextHub MCP server");
    // Prefix check only; the key itself never reaches the logs.
    if api_key.starts_with("ch_") {
        tracing::info!("API key format: valid (ch_***)");
    } else {
        tracing::warn!("API key format: unexpected (keys normally start with ch_)");
    }

    let api = ApiClient::builder()
        .base_url(&cli.api_url)
        .api_key(&api_key)
        .build()?;

    tracing::info!("ready, waiting for MCP client on stdio");
    McpServer::new(ContextHub::new(api)).serve_stdio().await?;

    Ok(())
}

/// Initialize tracing to stderr. `RUST_LOG` overrides the built-in filter.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "contexthub=debug,contexthub_api=debug,contexthub_mcp=debug,contexthub_server=debug,info"
    } else {
        "contexthub=info,contexthub_api=info,contexthub_mcp=info,contexthub_server=info,warn"
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
                ),
        )
        .init();
}
