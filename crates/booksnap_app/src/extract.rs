use booksnap_domain::{Error, Result};
use serde_json::Value;
use tracing::warn;

/// Recovers a JSON value from the model's final reply text, tolerating
/// markdown fencing and surrounding prose. Attempts run in order and each is
/// isolated; the first success wins.
pub fn extract_json(raw: &str) -> Result<Value> {
    let unfenced = strip_fences(raw.trim());

    if let Ok(value) = serde_json::from_str(unfenced) {
        return Ok(value);
    }

    if let Some(span) = brace_span(unfenced) {
        if let Ok(value) = serde_json::from_str(span) {
            return Ok(value);
        }
    }

    // Last resort: the balanced brace span around the summary contract's
    // leading key, taken from the untouched reply.
    if let Some(span) = book_title_span(raw) {
        if let Ok(value) = serde_json::from_str(span) {
            warn!("recovered summary JSON from a noisy model reply");
            return Ok(value);
        }
    }

    Err(Error::Parse { raw: raw.to_string() })
}

/// Strips a leading ```json or ``` fence and a trailing ``` fence, if
/// present.
fn strip_fences(text: &str) -> &str {
    let mut text = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Greedy object span: first `{` through last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

/// Balanced object span enclosing the `"bookTitle"` key: the nearest `{`
/// before the key through its matching `}`. Brace counting ignores string
/// context, which is acceptable for a last-resort attempt.
fn book_title_span(text: &str) -> Option<&str> {
    let key = text.find("\"bookTitle\"")?;
    let start = text[..key].rfind('{')?;

    let mut depth = 0usize;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn summary_fixture() -> Value {
        json!({
            "bookTitle": "Deep Work",
            "author": "Cal Newport",
            "mainPoints": [{"title": "Focus", "description": "Focus is rare."}],
        })
    }

    #[test]
    fn test_bare_json_parses_directly() {
        let fixture = summary_fixture().to_string();
        let actual = extract_json(&fixture).unwrap();

        assert_eq!(actual, summary_fixture());
    }

    #[test]
    fn test_fencing_variants_are_equivalent() {
        let bare = summary_fixture().to_string();
        let fenced = format!("```json\n{bare}\n```");
        let anonymous_fence = format!("```\n{bare}\n```");

        let actual = extract_json(&fenced).unwrap();

        assert_eq!(actual, extract_json(&bare).unwrap());
        assert_eq!(actual, extract_json(&anonymous_fence).unwrap());
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let fixture = format!(
            "Here is the summary you asked for:\n{}\nLet me know if you need more.",
            summary_fixture()
        );
        let actual = extract_json(&fixture).unwrap();

        assert_eq!(actual, summary_fixture());
    }

    #[test]
    fn test_book_title_span_rescues_broken_surroundings() {
        // Stray braces make both the direct parse and the greedy span fail;
        // only the balanced span around "bookTitle" can recover the object.
        let fixture = format!("{{oops\n{}\ntrailing }} noise", summary_fixture());
        let actual = extract_json(&fixture).unwrap();

        assert_eq!(actual, summary_fixture());
    }

    #[test]
    fn test_unrecoverable_text_is_a_parse_error() {
        let actual = extract_json("no json here at all");

        match actual {
            Err(Error::Parse { raw }) => assert_eq!(raw, "no json here at all"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_preserves_summary_shape() {
        let fixture = json!({
            "bookTitle": "T",
            "author": "A",
            "briefDescription": "B",
            "mainPoints": [{"title": "p", "description": "d"}],
            "callToAction": "C",
            "conclusion": "Z",
        });
        let actual = extract_json(&fixture.to_string()).unwrap();

        assert_eq!(actual, fixture);
    }
}
