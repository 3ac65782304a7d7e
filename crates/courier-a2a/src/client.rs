//! A2A client — sends messages to an agent endpoint
//!
//! One POST per call, no retries. The conversation context id returned by
//! the agent is persisted through the [`SessionStore`] so the next
//! invocation can continue the same conversation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::protocol::{FileContent, Message, Part, SendRequest, SendResponse};
use crate::session::{SessionStore, normalize_base_url};

/// Everything that can abort a send
#[derive(Debug, Error)]
pub enum SendError {
    #[error("file not found: {}", .0.display())]
    AttachmentMissing(PathBuf),
    #[error("failed to read attachment {}: {source}", .path.display())]
    AttachmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("agent returned HTTP {0}")]
    Status(StatusCode),
    #[error("failed to parse agent response: {0}")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("failed to persist session: {0}")]
    Session(#[source] std::io::Error),
}

/// A2A client bound to one endpoint and access token
pub struct A2aClient {
    http: Client,
    base_url: String,
    token: String,
    store: SessionStore,
}

impl A2aClient {
    /// Client with the default per-user session store
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Self {
        Self::with_store(base_url, token, timeout, SessionStore::new())
    }

    /// Client with an explicit session store
    pub fn with_store(
        base_url: &str,
        token: &str,
        timeout: Duration,
        store: SessionStore,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            base_url: normalize_base_url(base_url).to_string(),
            token: token.to_string(),
            store,
        }
    }

    /// Message endpoint with the token embedded in the path
    fn endpoint_url(&self) -> String {
        format!("{}/a2a/t-{}", self.base_url, self.token)
    }

    /// Send one message, then remember any context id the agent returns.
    ///
    /// Attachments are checked and encoded before any network activity; a
    /// missing file fails the whole call. With `use_context`, a previously
    /// stored context id for this endpoint rides along on the message. The
    /// store is only touched after a fully successful round trip.
    pub async fn send_message(
        &self,
        text: &str,
        attachments: &[PathBuf],
        use_context: bool,
    ) -> Result<SendResponse, SendError> {
        let mut message = Message::user(build_parts(text, attachments)?);
        if use_context {
            message.context_id = self.store.load(&self.base_url);
            if let Some(context_id) = &message.context_id {
                debug!("Reusing stored context {}", context_id);
            }
        }

        let url = self.endpoint_url();
        debug!("Sending message {} to {}", message.message_id, url);

        let resp = self
            .http
            .post(&url)
            .json(&SendRequest { message })
            .send()
            .await
            .map_err(SendError::Transport)?;

        if !resp.status().is_success() {
            return Err(SendError::Status(resp.status()));
        }

        let response: SendResponse = resp.json().await.map_err(SendError::MalformedResponse)?;

        if let Some(context_id) = &response.result.context_id {
            self.store
                .save(&self.base_url, context_id)
                .map_err(SendError::Session)?;
            info!("Conversation context: {}", context_id);
        }

        Ok(response)
    }
}

/// Text part first, then file parts in input order
fn build_parts(text: &str, attachments: &[PathBuf]) -> Result<Vec<Part>, SendError> {
    let mut parts = vec![Part::Text {
        text: text.to_string(),
    }];
    for path in attachments {
        parts.push(encode_attachment(path)?);
    }
    Ok(parts)
}

/// Read a file into a base64 file part named after its base name
fn encode_attachment(path: &Path) -> Result<Part, SendError> {
    if !path.exists() {
        return Err(SendError::AttachmentMissing(path.to_path_buf()));
    }
    let content = std::fs::read(path).map_err(|source| SendError::AttachmentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Part::File {
        file: FileContent {
            name,
            mime_type: "application/octet-stream".to_string(),
            bytes: BASE64.encode(&content),
        },
    })
}
