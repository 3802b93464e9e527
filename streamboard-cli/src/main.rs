//! Streamboard CLI
//!
//! Command-line interface for the Streamboard token-stream dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streamboard_api::{ApiConfig, ApiServer};
use streamboard_cache::{CacheConfig, SummaryCache};
use streamboard_chain::{
    create_stream_calldata, ChainConfig, CreateStreamParams, RpcStreamReader,
    CREATE_STREAM_SIGNATURE,
};
use streamboard_core::constants::DEFAULT_READY_THRESHOLD;
use streamboard_core::traits::StreamIndex;
use streamboard_core::types::StreamView;
use streamboard_indexer::{SubgraphClient, SubgraphConfig};
use streamboard_loader::{LoadOutcome, LoaderConfig, StreamLoader, SummaryResolver};

/// Streamboard - dashboard for on-chain token streams
#[derive(Parser)]
#[command(name = "streamboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all streams from the indexer and print the loaded view
    List {
        /// Ethereum RPC URL
        #[arg(long, env = "ETH_RPC_URL")]
        rpc_url: Option<String>,
        /// Subgraph endpoint
        #[arg(long, env = "SUBGRAPH_ENDPOINT")]
        subgraph: Option<String>,
        /// Readiness threshold
        #[arg(long, default_value_t = DEFAULT_READY_THRESHOLD)]
        threshold: usize,
    },

    /// Resolve one stream's summary
    Summary {
        /// Stream contract address
        address: String,
        /// Ethereum RPC URL
        #[arg(long, env = "ETH_RPC_URL")]
        rpc_url: Option<String>,
    },

    /// Build create-stream factory calldata for an external wallet
    Calldata {
        /// Recipient address
        #[arg(long)]
        recipient: String,
        /// Total capacity as a decimal token amount
        #[arg(long)]
        amount: String,
        /// Release frequency in weeks
        #[arg(long, default_value_t = 1)]
        weeks: u64,
        /// Start the stream with its full balance available
        #[arg(long)]
        start_full: bool,
        /// Streamed ERC-20 token address
        #[arg(long)]
        token: String,
        /// Stream factory address; when given, a full transaction request
        /// is printed as JSON
        #[arg(long)]
        factory: Option<String>,
    },

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "streamboard=debug,info"
    } else {
        "streamboard=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::List {
            rpc_url,
            subgraph,
            threshold,
        } => cmd_list(rpc_url, subgraph, threshold).await,
        Commands::Summary { address, rpc_url } => cmd_summary(&address, rpc_url).await,
        Commands::Calldata {
            recipient,
            amount,
            weeks,
            start_full,
            token,
            factory,
        } => cmd_calldata(recipient, amount, weeks, start_full, token, factory),
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
    }
}

fn chain_config(rpc_url: Option<String>) -> ChainConfig {
    match rpc_url {
        Some(url) => ChainConfig::new(url),
        None => ChainConfig::from_env(),
    }
}

/// Fetch and display the full stream view
async fn cmd_list(
    rpc_url: Option<String>,
    subgraph: Option<String>,
    threshold: usize,
) -> Result<()> {
    println!("{}", "🌊 Loading streams...".cyan().bold());

    let index = match subgraph {
        Some(endpoint) => SubgraphClient::with_config(SubgraphConfig::new(endpoint)),
        None => SubgraphClient::with_config(SubgraphConfig::from_env()),
    };

    let references = index
        .streams()
        .await
        .context("Failed to fetch streams from the indexer")?;

    if references.is_empty() {
        println!("\n{}", "No streams found in the indexer.".yellow());
        return Ok(());
    }

    let reader = Arc::new(RpcStreamReader::with_config(chain_config(rpc_url)));
    let cache = Arc::new(SummaryCache::with_config(CacheConfig::from_env()));
    let loader = StreamLoader::new(
        SummaryResolver::new(reader, cache),
        LoaderConfig::new().ready_threshold(threshold),
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Resolving {} stream summaries...", references.len()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = loader
        .load(&references)
        .await
        .context("Failed to load stream summaries")?;

    spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Published { streams, ready } => {
            println!("\n{} {} stream(s):", "✅".green(), streams.len());
            for view in &streams {
                print_stream(view);
            }
            if !ready {
                println!(
                    "\n{}",
                    format!("⚠️  View below readiness threshold ({threshold}).").yellow()
                );
            }
        }
        LoadOutcome::Superseded => {
            println!("\n{}", "Load superseded by a newer invocation.".yellow());
        }
    }

    Ok(())
}

fn print_stream(view: &StreamView) {
    let percent = match view.known_percent() {
        Some(p) => format!("{p:.0}%"),
        None => "unknown".into(),
    };

    println!(
        "   {} {}",
        "Stream:".green(),
        view.address
    );
    println!(
        "      {} {}   {} {}",
        "Owner:".dimmed(),
        view.owner,
        "Recipient:".dimmed(),
        view.recipient
    );
    println!(
        "      {} {:.4}   {} {}",
        "Cap:".dimmed(),
        view.cap,
        "Filled:".dimmed(),
        percent
    );
}

/// Resolve and display one stream summary
async fn cmd_summary(address: &str, rpc_url: Option<String>) -> Result<()> {
    println!("{} {}", "🔍 Resolving stream:".cyan().bold(), address);

    let reader = Arc::new(RpcStreamReader::with_config(chain_config(rpc_url)));
    let cache = Arc::new(SummaryCache::with_config(CacheConfig::from_env()));
    let resolver = SummaryResolver::new(reader, cache);

    let summary = resolver
        .resolve(address)
        .await
        .context("Failed to resolve stream summary")?;

    println!("\n{}", "✅ Stream summary:".green().bold());
    println!("   {} {:.4} tokens", "Cap:".dimmed(), summary.cap);
    match summary.known_percent() {
        Some(percent) => println!("   {} {percent:.2}%", "Filled:".dimmed()),
        None => println!("   {} {}", "Filled:".dimmed(), "unknown (zero cap)".yellow()),
    }

    Ok(())
}

/// Build and display factory calldata
fn cmd_calldata(
    recipient: String,
    amount: String,
    weeks: u64,
    start_full: bool,
    token: String,
    factory: Option<String>,
) -> Result<()> {
    println!("{}", "🛠  Building create-stream calldata...".cyan().bold());

    let params = CreateStreamParams {
        recipient,
        cap: amount,
        frequency_weeks: weeks,
        start_full,
        token,
    };

    let calldata = create_stream_calldata(&params).context("Failed to encode calldata")?;

    println!("\n{}", "✅ Factory call:".green().bold());
    println!("   {} {}", "Function:".dimmed(), CREATE_STREAM_SIGNATURE);
    println!("   {} {}", "Calldata:".dimmed(), calldata);

    if let Some(factory) = factory {
        println!("\n{}", "📋 Transaction request (JSON):".yellow().bold());
        let request_json = serde_json::json!({
            "to": factory,
            "data": calldata,
            "value": "0x0",
        });
        println!("{}", serde_json::to_string_pretty(&request_json)?);
    }

    println!("\n{}", "ℹ️  Next steps:".cyan());
    println!("   1. Submit this calldata to the stream factory from your wallet");
    println!("   2. Refresh the stream view once the transaction confirms");

    Ok(())
}

/// Run API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting Streamboard API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig::from_env();
    let server = ApiServer::new(config);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}
