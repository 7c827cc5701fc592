use booksnap_domain::{BookSummary, Error, Result, REQUIRED_FIELDS};
use serde_json::Value;

const NOT_FOUND_SENTINEL: &str = "Book not found";

/// Enforces the required-field contract on a raw payload and converts it into
/// a typed [`BookSummary`]. This is the single point where unvalidated JSON
/// becomes a trusted summary.
pub fn validate(value: Value) -> Result<BookSummary> {
    if value.get("error").and_then(Value::as_str) == Some(NOT_FOUND_SENTINEL) {
        return Err(Error::BookNotFound);
    }

    for field in REQUIRED_FIELDS {
        if !is_present(value.get(*field)) {
            return Err(Error::IncompleteSummary { field: field.to_string() });
        }
    }

    let main_points_filled = value
        .get("mainPoints")
        .and_then(Value::as_array)
        .is_some_and(|points| !points.is_empty());
    if !main_points_filled {
        return Err(Error::IncompleteSummary { field: "mainPoints".to_string() });
    }

    serde_json::from_value(value).map_err(|error| Error::IncompleteSummary {
        field: error.to_string(),
    })
}

/// Present means non-falsy: not absent, not null, not an empty string, not an
/// empty array, not zero, not false.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(Value::Object(_)) => true,
    }
}
