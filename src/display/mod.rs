//! Terminal display and formatting utilities.
//!
//! Handles colorized JSON output, token status rendering, and the
//! lifetime timeline for human-readable terminal output.

pub mod json_printer;
pub mod timeline;
pub mod token_status;
