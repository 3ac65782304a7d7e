//! A2A client-side support for Courier
//!
//! Wire types, the per-endpoint session cache, the one-shot message
//! sender, and the endpoint connectivity validator.

pub mod client;
pub mod protocol;
pub mod session;
pub mod validate;

pub use client::{A2aClient, SendError};
pub use protocol::{
    AgentCard, FileContent, HistoryEntry, Message, Part, Role, SendRequest, SendResponse,
    SendResult,
};
pub use session::{SessionStore, normalize_base_url};
pub use validate::{
    AuthMethod, ConnectivityValidator, ProbeOutcome, ProbeResult, ValidationReport, detect_token,
    ellipsize,
};
