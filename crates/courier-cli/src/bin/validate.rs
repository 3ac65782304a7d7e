//! courier-validate — probe an A2A endpoint's authentication placements
//!
//! Tries each supported token placement against the agent's metadata card
//! and reports which ones the endpoint accepts. Exits 0 when at least one
//! placement works.

use clap::Parser;

use courier_a2a::{ConnectivityValidator, ProbeOutcome, detect_token, ellipsize};

/// Validate connectivity to an A2A agent
#[derive(Parser, Debug)]
#[command(name = "courier-validate", version, about)]
struct Args {
    /// Agent base URL (e.g. http://localhost:8080)
    url: String,

    /// A2A access token (defaults to $A2A_TOKEN or the token embedded in the URL)
    #[arg(long, visible_alias = "api-key")]
    token: Option<String>,
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

    let token = args
        .token
        .or_else(|| std::env::var("A2A_TOKEN").ok())
        .or_else(|| {
            let detected = detect_token(&args.url);
            if let Some(token) = &detected {
                println!("Auto-detected token from URL: {}", token);
            }
            detected
        });

    println!("Validating A2A connection to {}", args.url);

    let validator = ConnectivityValidator::new();
    let report = validator.validate(&args.url, token.as_deref()).await;

    if report.probes.is_empty() {
        println!("No token available (pass --token or set A2A_TOKEN)");
    }
    for probe in &report.probes {
        match &probe.outcome {
            ProbeOutcome::Pass { agent, description } => {
                println!(
                    "  PASS {}: agent '{}' ({})",
                    probe.method,
                    agent,
                    ellipsize(description, 60)
                );
            }
            ProbeOutcome::Rejected { status } => {
                println!("  FAIL {}: HTTP {}", probe.method, status);
            }
            ProbeOutcome::Errored { message } => {
                println!("  FAIL {}: {}", probe.method, message);
            }
        }
    }

    println!();
    println!("{}", report.summary());

    if !report.is_connected() {
        std::process::exit(1);
    }
}
