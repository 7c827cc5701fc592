use serde::{Deserialize, Serialize};

use crate::ContentBlock;

/// Why the model stopped producing output. `ToolUse` means the model is
/// waiting for tool results before it can continue.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    #[default]
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    #[serde(other)]
    Other,
}

/// A single non-streaming reply from the model.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ModelReply {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: StopReason,
}

impl ModelReply {
    pub fn is_tool_use(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
    }

    /// Concatenation of all text blocks, in block order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect()
    }

    /// Ids of the tool-use blocks the model expects results for, in block
    /// order.
    pub fn tool_use_ids(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_concatenates_in_block_order() {
        let fixture = ModelReply {
            content: vec![
                ContentBlock::text("first "),
                ContentBlock::ToolUse {
                    id: "toolu_01".into(),
                    name: "web_search".into(),
                    input: serde_json::json!({"query": "book"}),
                },
                ContentBlock::text("second"),
            ],
            stop_reason: StopReason::EndTurn,
        };

        let actual = fixture.text();
        let expected = "first second";

        assert_eq!(actual, expected);
        assert_eq!(fixture.tool_use_ids(), vec!["toolu_01"]);
    }

    #[test]
    fn test_unknown_stop_reason_deserializes_as_other() {
        let actual: StopReason = serde_json::from_str(r#""pause_turn""#).unwrap();
        let expected = StopReason::Other;

        assert_eq!(actual, expected);
    }
}
