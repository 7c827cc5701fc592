use booksnap_domain::{
    CompletionRequest, ContentBlock, Conversation, Message, OrchestratorConfig, ProviderClient,
    Result, ToolDefinition,
};
use tracing::debug;

/// Marker content acknowledging a tool-use id. The provider injects the real
/// search results itself; it only needs each id to be answered.
const TOOL_ACK_MARKER: &str = "Search completed";

/// Drives the multi-turn exchange with the model until it reaches a final
/// answer or the call cap, then returns the final reply's text.
///
/// Round trips are strictly sequential; each request carries the full
/// conversation so far. Hitting the cap is not an error: the loop stops and
/// returns whatever text the last reply carried, possibly none.
pub async fn run_conversation(
    provider: &dyn ProviderClient,
    system_prompt: &str,
    initial_user_message: &str,
    tools: &[ToolDefinition],
    config: &OrchestratorConfig,
) -> Result<String> {
    let mut conversation = Conversation::start(initial_user_message);
    let mut reply = provider
        .complete(build_request(system_prompt, tools, &conversation, config))
        .await?;
    let mut calls = 1;

    while reply.is_tool_use() && calls < config.max_tool_iterations {
        let acks: Vec<ContentBlock> = reply
            .tool_use_ids()
            .into_iter()
            .map(|id| ContentBlock::tool_ack(id, TOOL_ACK_MARKER))
            .collect();
        debug!(call = calls, tool_uses = acks.len(), "model requested tool use");

        conversation.push(Message::assistant(reply.content.clone()));
        conversation.push(Message::user(acks));

        reply = provider
            .complete(build_request(system_prompt, tools, &conversation, config))
            .await?;
        calls += 1;
    }

    debug!(calls, stop_reason = ?reply.stop_reason, "tool-use loop finished");
    Ok(reply.text())
}

fn build_request(
    system_prompt: &str,
    tools: &[ToolDefinition],
    conversation: &Conversation,
    config: &OrchestratorConfig,
) -> CompletionRequest {
    CompletionRequest::new(config.model.clone(), config.max_tokens)
        .system(system_prompt)
        .tools(tools.to_vec())
        .messages(conversation.messages().to_vec())
}
