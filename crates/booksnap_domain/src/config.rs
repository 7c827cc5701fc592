use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::ModelId;

/// Tunables for one orchestration run.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct OrchestratorConfig {
    pub model: ModelId,
    pub max_tokens: u32,
    /// Safety cap on tool-use round trips. Reaching it is not an error; the
    /// loop stops and returns whatever text the final reply carries.
    pub max_tool_iterations: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            max_tokens: 16_000,
            max_tool_iterations: 10,
        }
    }
}

/// Configuration for the retry mechanism on outbound provider calls.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct RetryConfig {
    /// Minimum delay in milliseconds between retry attempts
    pub min_delay_ms: u64,

    /// Backoff multiplication factor for each retry attempt
    pub backoff_factor: u64,

    /// Maximum number of retry attempts
    pub max_retry_attempts: usize,

    /// HTTP status codes that should trigger retries. Client errors never
    /// retry; throttling and credential failures must surface unchanged.
    pub retry_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 500,
            backoff_factor: 2,
            max_retry_attempts: 3,
            retry_status_codes: vec![500, 502, 503, 529],
        }
    }
}
