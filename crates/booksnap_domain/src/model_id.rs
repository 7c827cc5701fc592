use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

/// Identifier of the model a completion request is addressed to.
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(value: impl ToString) -> Self {
        ModelId(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::new("claude-sonnet-4-20250514")
    }
}
