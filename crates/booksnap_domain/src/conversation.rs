use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a conversation message. The system prompt travels outside the
/// message list, so only the two in-band roles exist here.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single unit of a conversation turn, in the provider's wire encoding.
///
/// `ServerToolUse` and `WebSearchToolResult` are emitted by the provider when
/// it executes the hosted web-search tool itself; the loop carries them back
/// verbatim without interpreting them.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
    ServerToolUse {
        id: String,
        name: String,
        input: Value,
    },
    WebSearchToolResult {
        tool_use_id: String,
        content: Value,
    },
}

impl ContentBlock {
    pub fn text(text: impl ToString) -> Self {
        ContentBlock::Text { text: text.to_string() }
    }

    /// Placeholder acknowledgment for a tool-use id. The provider injects the
    /// actual search results itself; the conversation only needs the id to be
    /// answered.
    pub fn tool_ack(tool_use_id: impl ToString, marker: impl ToString) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.to_string(),
            content: marker.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// One turn of the conversation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(content: Vec<ContentBlock>) -> Self {
        Message { role: Role::User, content }
    }

    pub fn user_text(text: impl ToString) -> Self {
        Message::user(vec![ContentBlock::text(text)])
    }

    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Message { role: Role::Assistant, content }
    }
}

/// Append-only message log for a single summarization request. Built from
/// scratch per request and discarded once the tool-use loop terminates.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Conversation(Vec<Message>);

impl Conversation {
    /// Seeds the log with a single user turn.
    pub fn start(initial_user_message: impl ToString) -> Self {
        Conversation(vec![Message::user_text(initial_user_message)])
    }

    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
