mod anthropic;
mod error;

pub use anthropic::{Anthropic, AnthropicBuilder};
pub use error::ErrorResponse;
