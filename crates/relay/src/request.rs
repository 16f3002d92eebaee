//! Inbound chat request types.
//!
//! The browser sends the full visible history, oldest first, as a list of
//! turns whose content is a list of typed parts. Only `text` parts carry
//! meaning today; unknown part types are ignored, not rejected, so a newer
//! front-end can ship richer parts without breaking older servers.

use folio_core::message::Message;
use serde::Deserialize;

/// The request body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// One conversation turn as sent by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// Caller-visible roles. `system` is never accepted from the wire — the
/// relay owns the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A typed content part.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    /// Any part type this server does not understand.
    #[serde(other)]
    Unsupported,
}

impl ChatTurn {
    /// Concatenated text of all text parts; non-text parts contribute nothing.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::Unsupported => None,
            })
            .collect()
    }

    /// Convert into the domain message handed to the provider.
    pub fn into_message(self) -> Message {
        let text = self.text();
        match self.role {
            TurnRole::User => Message::user(text),
            TurnRole::Assistant => Message::assistant(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::message::Role;

    #[test]
    fn parses_text_parts() {
        let json = r#"{
            "messages": [
                {"role": "user", "parts": [{"type": "text", "text": "Show me Last Call"}]}
            ]
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].text(), "Show me Last Call");
    }

    #[test]
    fn unknown_part_types_are_ignored_not_rejected() {
        let json = r#"{
            "messages": [
                {"role": "user", "parts": [
                    {"type": "image", "url": "https://example.com/x.png"},
                    {"type": "text", "text": "what is this?"}
                ]}
            ]
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.messages[0].text(), "what is this?");
    }

    #[test]
    fn multiple_text_parts_concatenate() {
        let json = r#"{"role": "assistant", "parts": [
            {"type": "text", "text": "Hello "},
            {"type": "text", "text": "again"}
        ]}"#;
        let turn: ChatTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.text(), "Hello again");
    }

    #[test]
    fn system_role_is_rejected() {
        let json = r#"{"role": "system", "parts": []}"#;
        assert!(serde_json::from_str::<ChatTurn>(json).is_err());
    }

    #[test]
    fn non_list_messages_field_is_rejected() {
        let json = r#"{"messages": "not a list"}"#;
        assert!(serde_json::from_str::<ChatRequest>(json).is_err());
    }

    #[test]
    fn missing_messages_field_is_rejected() {
        assert!(serde_json::from_str::<ChatRequest>("{}").is_err());
    }

    #[test]
    fn turn_converts_to_domain_message() {
        let turn = ChatTurn {
            role: TurnRole::User,
            parts: vec![ContentPart::Text {
                text: "resume please".into(),
            }],
        };
        let msg = turn.into_message();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "resume please");
    }
}
