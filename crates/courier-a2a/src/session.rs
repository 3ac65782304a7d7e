//! Per-endpoint conversation context cache
//!
//! A flat JSON map from base URL to the last context id the agent issued.
//! Best-effort: a missing or corrupt file reads as an empty map, and
//! concurrent writers resolve as last-writer-wins.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Session file name under the user's home directory
const SESSION_FILE: &str = ".a2a_sessions.json";

/// Strip trailing slashes so equivalent URLs share one entry
pub fn normalize_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Durable cache of the most recent context id per endpoint
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the per-user default location (`~/.a2a_sessions.json`)
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: home.join(SESSION_FILE),
        }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Last known context id for an endpoint, if any
    pub fn load(&self, base_url: &str) -> Option<String> {
        self.read_map().remove(normalize_base_url(base_url))
    }

    /// Remember a context id for an endpoint. Rewrites the whole file,
    /// via a sibling temp file + rename.
    pub fn save(&self, base_url: &str, context_id: &str) -> io::Result<()> {
        let mut map = self.read_map();
        map.insert(
            normalize_base_url(base_url).to_string(),
            context_id.to_string(),
        );
        let json = serde_json::to_string_pretty(&map)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Saved context for {} to {}", base_url, self.path.display());
        Ok(())
    }

    /// Parse the session file, treating absence or corruption as empty
    fn read_map(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
