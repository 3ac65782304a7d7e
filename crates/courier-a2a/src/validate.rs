//! Connectivity validator — probes the four A2A token placements
//!
//! Each placement is tried once against the agent's metadata card, in a
//! fixed order. Failures are contained per probe; the endpoint counts as
//! reachable when at least one placement succeeds.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::protocol::AgentCard;

/// Per-probe timeout
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// The four supported token placements, in trial order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    TokenUrl,
    Bearer,
    ApiKeyHeader,
    QueryParam,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 4] = [
        AuthMethod::TokenUrl,
        AuthMethod::Bearer,
        AuthMethod::ApiKeyHeader,
        AuthMethod::QueryParam,
    ];
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::TokenUrl => write!(f, "Token URL"),
            AuthMethod::Bearer => write!(f, "Bearer"),
            AuthMethod::ApiKeyHeader => write!(f, "X-API-KEY header"),
            AuthMethod::QueryParam => write!(f, "Query param"),
        }
    }
}

/// What a single probe observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// HTTP 200 with a parsable agent card
    Pass { agent: String, description: String },
    /// Any other HTTP status
    Rejected { status: u16 },
    /// Network or parse failure
    Errored { message: String },
}

impl ProbeOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, ProbeOutcome::Pass { .. })
    }
}

/// One probe's placement and outcome
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub method: AuthMethod,
    pub outcome: ProbeOutcome,
}

/// Aggregate of all probes run against one endpoint
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub probes: Vec<ProbeResult>,
    pub pass_count: usize,
}

impl ValidationReport {
    fn from_probes(probes: Vec<ProbeResult>) -> Self {
        let pass_count = probes.iter().filter(|p| p.outcome.passed()).count();
        Self { probes, pass_count }
    }

    /// Reachable through at least one placement
    pub fn is_connected(&self) -> bool {
        self.pass_count > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} auth methods working",
            self.pass_count,
            self.probes.len()
        )
    }
}

/// Probes an endpoint's metadata card through each token placement
pub struct ConnectivityValidator {
    http: Client,
}

impl ConnectivityValidator {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Run all probes sequentially. Without a token nothing runs and the
    /// report counts as not connected.
    pub async fn validate(&self, base_url: &str, token: Option<&str>) -> ValidationReport {
        let base = base_url.trim_end_matches('/');
        let mut probes = Vec::new();
        match token {
            Some(token) => {
                for method in AuthMethod::ALL {
                    let outcome = self.probe(base, token, method).await;
                    match &outcome {
                        ProbeOutcome::Pass { agent, .. } => {
                            info!("{}: ok (agent: {})", method, agent)
                        }
                        ProbeOutcome::Rejected { status } => debug!("{}: HTTP {}", method, status),
                        ProbeOutcome::Errored { message } => debug!("{}: {}", method, message),
                    }
                    probes.push(ProbeResult { method, outcome });
                }
            }
            None => warn!("No token available, skipping all probes"),
        }
        ValidationReport::from_probes(probes)
    }

    async fn probe(&self, base: &str, token: &str, method: AuthMethod) -> ProbeOutcome {
        let card_url = format!("{}/a2a/.well-known/agent.json", base);
        let req = match method {
            AuthMethod::TokenUrl => self
                .http
                .get(format!("{}/a2a/t-{}/.well-known/agent.json", base, token)),
            AuthMethod::Bearer => self.http.get(&card_url).bearer_auth(token),
            AuthMethod::ApiKeyHeader => self.http.get(&card_url).header("X-API-KEY", token),
            AuthMethod::QueryParam => self.http.get(&card_url).query(&[("api_key", token)]),
        };

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                return ProbeOutcome::Errored {
                    message: e.to_string(),
                };
            }
        };
        if resp.status() != reqwest::StatusCode::OK {
            return ProbeOutcome::Rejected {
                status: resp.status().as_u16(),
            };
        }
        match resp.json::<AgentCard>().await {
            Ok(card) => ProbeOutcome::Pass {
                agent: card.name,
                description: card.description,
            },
            Err(e) => ProbeOutcome::Errored {
                message: e.to_string(),
            },
        }
    }
}

impl Default for ConnectivityValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull a path-embedded token out of a URL like `{base}/a2a/t-{token}`
pub fn detect_token(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let rest = parsed.path().strip_prefix("/a2a/t-")?;
    let token = rest.split('/').next().filter(|t| !t.is_empty())?;
    Some(token.to_string())
}

/// Shorten report text to `max` characters
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}
