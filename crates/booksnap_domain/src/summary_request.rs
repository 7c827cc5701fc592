use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated summarization request. Construction trims both inputs and
/// rejects values that are empty afterwards, so the core never sees blank
/// titles or authors.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SummaryRequest {
    title: String,
    author: String,
}

impl SummaryRequest {
    pub fn new(title: impl AsRef<str>, author: impl AsRef<str>) -> Result<Self> {
        let title = title.as_ref().trim();
        let author = author.as_ref().trim();

        if title.is_empty() || author.is_empty() {
            return Err(Error::Validation(
                "Book title and author name cannot be empty.".to_string(),
            ));
        }

        Ok(SummaryRequest { title: title.to_string(), author: author.to_string() })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}
