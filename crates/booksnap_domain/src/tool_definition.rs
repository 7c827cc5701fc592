use serde::{Deserialize, Serialize};

/// A provider-executed tool registered on a completion request.
///
/// The web-search tool is the only one this service uses; the provider runs
/// the search itself and injects the results into the reply.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ToolDefinition {
    pub fn web_search() -> Self {
        ToolDefinition {
            kind: "web_search_20250305".to_string(),
            name: "web_search".to_string(),
        }
    }
}
