//! Role-tagged chat turns, serialised in the backend's wire format.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body shared by `/chat` and `/generate_report`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_backend_format() {
        let history = vec![ChatMessage::assistant("Hi"), ChatMessage::user("hi")];
        let json = serde_json::to_value(ChatRequest { messages: &history }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [
                    { "role": "assistant", "content": "Hi" },
                    { "role": "user", "content": "hi" }
                ]
            })
        );
    }

    #[test]
    fn roles_deserialize_lowercase() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"user","content":"I have a headache"}"#).unwrap();
        assert_eq!(msg, ChatMessage::user("I have a headache"));
        assert_eq!(msg.role.label(), "user");
    }
}
