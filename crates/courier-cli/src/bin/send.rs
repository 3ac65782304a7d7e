//! courier-send — send one message to an A2A agent endpoint
//!
//! Tracks the conversation context per endpoint in `~/.a2a_sessions.json`
//! so consecutive invocations continue the same conversation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use courier_a2a::A2aClient;

/// Send a message to an A2A agent
#[derive(Parser, Debug)]
#[command(name = "courier-send", version, about)]
struct Args {
    /// Agent base URL (e.g. http://localhost:8080)
    url: String,

    /// Message text to send
    message: String,

    /// File attachment (repeatable)
    #[arg(short = 'f', long = "file")]
    file: Vec<PathBuf>,

    /// A2A access token (defaults to $A2A_TOKEN)
    #[arg(short = 't', long)]
    token: Option<String>,

    /// Start a fresh conversation instead of reusing the stored context
    #[arg(long)]
    no_context: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let token = args
        .token
        .or_else(|| std::env::var("A2A_TOKEN").ok())
        .context("no token: pass --token or set A2A_TOKEN")?;

    let client = A2aClient::new(&args.url, &token, Duration::from_secs(args.timeout));

    println!("Sending message to {}...", args.url);
    if !args.file.is_empty() {
        let names: Vec<String> = args.file.iter().map(|p| p.display().to_string()).collect();
        println!("Attachments: {}", names.join(", "));
    }

    let response = client
        .send_message(&args.message, &args.file, !args.no_context)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!();
        println!("Response:");
        println!("{}", response.agent_text());
        if let Some(context_id) = &response.result.context_id {
            println!();
            println!("Context: {}", context_id);
        }
    }

    Ok(())
}
