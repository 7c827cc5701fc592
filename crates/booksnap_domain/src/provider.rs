use derive_setters::Setters;
use serde::Serialize;

use crate::{Message, ModelId, ModelReply, Result, ToolDefinition};

/// Everything the provider needs for one completion round trip.
#[derive(Clone, Debug, Serialize, Setters)]
#[setters(into)]
pub struct CompletionRequest {
    pub model: ModelId,
    pub max_tokens: u32,
    pub system: String,
    pub tools: Vec<ToolDefinition>,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn new(model: ModelId, max_tokens: u32) -> Self {
        CompletionRequest {
            model,
            max_tokens,
            system: String::new(),
            tools: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// Seam between the orchestration core and the outbound LLM provider.
///
/// Passed explicitly so tests can substitute a scripted fake without touching
/// process-wide state.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply>;
}
