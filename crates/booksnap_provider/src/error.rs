use serde::Deserialize;

/// Error envelope returned by the provider on non-2xx responses:
/// `{"type":"error","error":{"type":"...","message":"..."}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    /// Best-effort extraction of a human-readable message from an error body.
    /// Falls back to a trimmed body snippet when the envelope doesn't parse.
    pub fn message_from_body(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
            Err(_) => {
                let snippet: String = body.chars().take(200).collect();
                snippet
            }
        }
    }
}
