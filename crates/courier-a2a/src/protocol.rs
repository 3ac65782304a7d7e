//! A2A wire types shared by the sender and the validator
//!
//! Field names follow the Agent Zero dialect of the protocol: snake_case
//! on the message envelope, `mimeType` inside file parts.

use serde::{Deserialize, Serialize};

/// Author of a message or history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One piece of message content, discriminated by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    File { file: FileContent },
}

/// File attachment payload — content travels base64-encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub bytes: String,
}

/// Outgoing user message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
    pub kind: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl Message {
    /// Build a user message with a fresh id and no conversation context
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
            kind: "message".to_string(),
            message_id: uuid::Uuid::new_v4().to_string(),
            context_id: None,
        }
    }
}

/// POST body for a send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: Message,
}

/// One prior exchange in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// The `result` object of a send response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Full response to a send
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub result: SendResult,
}

/// Returned when the reply carries no history at all
pub const NO_RESPONSE: &str = "(no response)";
/// Returned when no history entry was authored by the agent
pub const NO_AGENT_RESPONSE: &str = "(no agent response)";
/// Returned when the agent's latest entry has no text parts
pub const NO_TEXT_RESPONSE: &str = "(no text response)";

impl SendResponse {
    /// Extract the latest agent-authored text from the history.
    ///
    /// Scans from the newest entry backwards; the first agent entry wins
    /// and its text parts are joined with newlines. The three empty
    /// outcomes return distinct sentinel strings.
    pub fn agent_text(&self) -> String {
        if self.result.history.is_empty() {
            return NO_RESPONSE.to_string();
        }
        for entry in self.result.history.iter().rev() {
            if entry.role == Role::Agent {
                let texts: Vec<&str> = entry
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text.as_str()),
                        Part::File { .. } => None,
                    })
                    .collect();
                if texts.is_empty() {
                    return NO_TEXT_RESPONSE.to_string();
                }
                return texts.join("\n");
            }
        }
        NO_AGENT_RESPONSE.to_string()
    }
}

/// Agent metadata served at `/.well-known/agent.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    #[serde(default = "default_agent_name")]
    pub name: String,
    #[serde(default = "default_agent_description")]
    pub description: String,
}

fn default_agent_name() -> String {
    "Unknown".to_string()
}

fn default_agent_description() -> String {
    "No description".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_entry(parts: Vec<Part>) -> HistoryEntry {
        HistoryEntry {
            role: Role::Agent,
            parts,
        }
    }

    fn user_entry(text: &str) -> HistoryEntry {
        HistoryEntry {
            role: Role::User,
            parts: vec![Part::Text {
                text: text.to_string(),
            }],
        }
    }

    #[test]
    fn test_message_serialization() {
        let message = Message::user(vec![Part::Text {
            text: "hello".to_string(),
        }]);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["kind"], "message");
        assert_eq!(json["parts"][0]["kind"], "text");
        assert_eq!(json["parts"][0]["text"], "hello");
        assert!(json["message_id"].is_string());
        // Absent context must not appear on the wire
        assert!(json.get("context_id").is_none());
    }

    #[test]
    fn test_message_with_context() {
        let mut message = Message::user(vec![]);
        message.context_id = Some("ctx-42".to_string());
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["context_id"], "ctx-42");
    }

    #[test]
    fn test_message_ids_unique() {
        let a = Message::user(vec![]);
        let b = Message::user(vec![]);
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_file_part_serialization() {
        let part = Part::File {
            file: FileContent {
                name: "notes.txt".to_string(),
                mime_type: "application/octet-stream".to_string(),
                bytes: "aGVsbG8=".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["file"]["name"], "notes.txt");
        assert_eq!(json["file"]["mimeType"], "application/octet-stream");
    }

    #[test]
    fn test_part_deserialization() {
        let part: Part = serde_json::from_str(r#"{"kind":"text","text":"hi"}"#).unwrap();
        assert_eq!(
            part,
            Part::Text {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_response_deserialization_lenient() {
        // Servers may omit result, context_id, or history entirely
        let response: SendResponse = serde_json::from_str("{}").unwrap();
        assert!(response.result.context_id.is_none());
        assert!(response.result.history.is_empty());
    }

    #[test]
    fn test_agent_text_empty_history() {
        let response = SendResponse::default();
        assert_eq!(response.agent_text(), NO_RESPONSE);
    }

    #[test]
    fn test_agent_text_user_only_history() {
        let response = SendResponse {
            result: SendResult {
                context_id: None,
                history: vec![user_entry("hello"), user_entry("anyone there?")],
            },
        };
        assert_eq!(response.agent_text(), NO_AGENT_RESPONSE);
    }

    #[test]
    fn test_agent_text_no_text_parts() {
        let response = SendResponse {
            result: SendResult {
                context_id: None,
                history: vec![agent_entry(vec![Part::File {
                    file: FileContent {
                        name: "out.bin".to_string(),
                        mime_type: "application/octet-stream".to_string(),
                        bytes: String::new(),
                    },
                }])],
            },
        };
        assert_eq!(response.agent_text(), NO_TEXT_RESPONSE);
    }

    #[test]
    fn test_agent_text_joins_parts() {
        let response = SendResponse {
            result: SendResult {
                context_id: None,
                history: vec![agent_entry(vec![
                    Part::Text {
                        text: "a".to_string(),
                    },
                    Part::Text {
                        text: "b".to_string(),
                    },
                ])],
            },
        };
        assert_eq!(response.agent_text(), "a\nb");
    }

    #[test]
    fn test_agent_text_picks_latest_agent_entry() {
        let response = SendResponse {
            result: SendResult {
                context_id: None,
                history: vec![
                    agent_entry(vec![Part::Text {
                        text: "old".to_string(),
                    }]),
                    user_entry("follow-up"),
                    agent_entry(vec![Part::Text {
                        text: "new".to_string(),
                    }]),
                ],
            },
        };
        assert_eq!(response.agent_text(), "new");
    }

    #[test]
    fn test_agent_card_defaults() {
        let card: AgentCard = serde_json::from_str("{}").unwrap();
        assert_eq!(card.name, "Unknown");
        assert_eq!(card.description, "No description");
    }

    #[test]
    fn test_agent_card_fields() {
        let card: AgentCard =
            serde_json::from_str(r#"{"name":"zero","description":"general agent"}"#).unwrap();
        assert_eq!(card.name, "zero");
        assert_eq!(card.description, "general agent");
    }
}
