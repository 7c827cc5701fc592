use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Required camelCase keys of the wire contract, in the order the prompt
/// lists them. The validator checks these before the raw payload is converted
/// into a [`BookSummary`].
pub const REQUIRED_FIELDS: &[&str] = &[
    "bookTitle",
    "author",
    "briefDescription",
    "mainPoints",
    "callToAction",
    "conclusion",
];

/// One key point or theme of the book.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct MainPoint {
    pub title: String,
    pub description: String,
}

/// A related title the reader might also enjoy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct SimilarBook {
    pub title: String,
    pub author: String,
    pub reason: String,
}

/// The validated summary object returned to the client. Field names follow
/// the camelCase wire contract the model is instructed to honor.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into, strip_option)]
pub struct BookSummary {
    pub book_title: String,
    pub author: String,
    pub brief_description: String,
    pub main_points: Vec<MainPoint>,
    pub call_to_action: String,
    pub conclusion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notable_quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_books: Option<Vec<SimilarBook>>,
}
