use booksnap_domain::{BookSummary, MainPoint, SimilarBook};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref CITE_OPEN: Regex = Regex::new(r"(?i)<cite[^>]*>").expect("valid citation regex");
    static ref CITE_CLOSE: Regex = Regex::new(r"(?i)</cite>").expect("valid citation regex");
}

/// Removes `<cite ...>`/`</cite>` wrappers, keeping the enclosed text, then
/// trims. Idempotent.
pub fn strip_citations(text: &str) -> String {
    let opened = CITE_OPEN.replace_all(text, "");
    let closed = CITE_CLOSE.replace_all(&opened, "");
    closed.trim().to_string()
}

/// Pure, total cleanup of citation markup across arbitrarily nested values.
/// Non-text leaves pass through unchanged.
pub trait Sanitize: Sized {
    fn sanitize(self) -> Self;
}

impl Sanitize for String {
    fn sanitize(self) -> Self {
        strip_citations(&self)
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(self) -> Self {
        self.map(Sanitize::sanitize)
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(self) -> Self {
        self.into_iter().map(Sanitize::sanitize).collect()
    }
}

impl Sanitize for Value {
    fn sanitize(self) -> Self {
        match self {
            Value::String(text) => Value::String(text.sanitize()),
            Value::Array(items) => Value::Array(items.sanitize()),
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.sanitize()))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl Sanitize for MainPoint {
    fn sanitize(self) -> Self {
        MainPoint {
            title: self.title.sanitize(),
            description: self.description.sanitize(),
        }
    }
}

impl Sanitize for SimilarBook {
    fn sanitize(self) -> Self {
        SimilarBook {
            title: self.title.sanitize(),
            author: self.author.sanitize(),
            reason: self.reason.sanitize(),
        }
    }
}

impl Sanitize for BookSummary {
    fn sanitize(self) -> Self {
        BookSummary {
            book_title: self.book_title.sanitize(),
            author: self.author.sanitize(),
            brief_description: self.brief_description.sanitize(),
            main_points: self.main_points.sanitize(),
            call_to_action: self.call_to_action.sanitize(),
            conclusion: self.conclusion.sanitize(),
            publish_year: self.publish_year.sanitize(),
            genre: self.genre.sanitize(),
            page_count: self.page_count,
            target_audience: self.target_audience.sanitize(),
            notable_quote: self.notable_quote.sanitize(),
            similar_books: self.similar_books.sanitize(),
        }
    }
}
