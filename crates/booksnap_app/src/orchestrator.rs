use std::sync::Arc;

use booksnap_domain::{
    Error, OrchestratorConfig, ProviderClient, Result, SummaryOutcome, SummaryRequest,
    ToolDefinition,
};
use tracing::{debug, warn};

use crate::extract::extract_json;
use crate::prompt::{initial_user_message, SYSTEM_PROMPT};
use crate::sanitize::Sanitize;
use crate::tool_loop::run_conversation;
use crate::validate::validate;

pub const EMPTY_REPLY_MESSAGE: &str = "Could not generate summary. Please try again.";
pub const PROCESS_FAILURE_MESSAGE: &str =
    "Could not process the book summary. Please try again.";
pub const NOT_FOUND_MESSAGE: &str =
    "We couldn't find that book. Please double-check the title and author name.";

/// Composes the tool-use loop, JSON extraction, validation and sanitization
/// into a single summarize operation with a uniform outcome shape.
///
/// Domain-level failures (not found, unparseable, incomplete) are converted
/// into failure outcomes here; provider failures propagate unchanged so the
/// HTTP layer can map each kind to a distinct status and message.
pub struct Orchestrator {
    provider: Arc<dyn ProviderClient>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Orchestrator { provider, config: OrchestratorConfig::default() }
    }

    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryOutcome> {
        debug!(title = request.title(), author = request.author(), "starting summarization");

        let text = run_conversation(
            self.provider.as_ref(),
            SYSTEM_PROMPT,
            &initial_user_message(request),
            &[ToolDefinition::web_search()],
            &self.config,
        )
        .await?;

        if text.trim().is_empty() {
            warn!("model produced no text");
            return Ok(SummaryOutcome::failure(EMPTY_REPLY_MESSAGE));
        }

        let value = match extract_json(&text) {
            Ok(value) => value,
            Err(Error::Parse { raw }) => {
                warn!(reply_len = raw.len(), "model reply held no recoverable JSON");
                return Ok(SummaryOutcome::failure(PROCESS_FAILURE_MESSAGE));
            }
            Err(other) => return Err(other),
        };

        let summary = match validate(value) {
            Ok(summary) => summary,
            Err(Error::BookNotFound) => {
                return Ok(SummaryOutcome::failure(NOT_FOUND_MESSAGE));
            }
            Err(error @ Error::IncompleteSummary { .. }) => {
                warn!(%error, "model returned an incomplete summary");
                return Ok(SummaryOutcome::failure(PROCESS_FAILURE_MESSAGE));
            }
            Err(other) => return Err(other),
        };

        Ok(SummaryOutcome::success(summary.sanitize()))
    }
}
