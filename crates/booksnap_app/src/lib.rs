mod extract;
mod orchestrator;
mod prompt;
mod sanitize;
mod tool_loop;
mod validate;

pub use extract::extract_json;
pub use orchestrator::*;
pub use prompt::{initial_user_message, SYSTEM_PROMPT};
pub use sanitize::{strip_citations, Sanitize};
pub use tool_loop::run_conversation;
pub use validate::validate;
