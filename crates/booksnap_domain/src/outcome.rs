use serde::{Deserialize, Serialize};

use crate::BookSummary;

/// The sole value crossing the core/HTTP boundary. Serializes as
/// `{"success":true,"summary":{...}}` or `{"success":false,"error":"..."}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Success { success: bool, summary: BookSummary },
    Failure { success: bool, error: String },
}

impl SummaryOutcome {
    pub fn success(summary: BookSummary) -> Self {
        SummaryOutcome::Success { success: true, summary }
    }

    pub fn failure(error: impl ToString) -> Self {
        SummaryOutcome::Failure { success: false, error: error.to_string() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SummaryOutcome::Success { .. })
    }

    pub fn summary(&self) -> Option<&BookSummary> {
        match self {
            SummaryOutcome::Success { summary, .. } => Some(summary),
            SummaryOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Success { .. } => None,
            SummaryOutcome::Failure { error, .. } => Some(error),
        }
    }
}
