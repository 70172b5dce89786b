//! Concrete transports for the reasoning service.
//!
//! `command` drives a local CLI over stdin/stdout, `http` posts to a
//! Messages-style endpoint. Both enforce the context timeout and release
//! their resources before returning.

mod command;
mod http;

pub use command::CommandReasoningClient;
pub use http::HttpReasoningClient;

use crate::config::{Backend, ReasoningConfig};
use agdiff_types::ReasoningClient;

/// Pick the transport named by the configuration.
pub fn build_client(config: &ReasoningConfig) -> Box<dyn ReasoningClient> {
    match config.backend {
        Backend::Command => Box::new(CommandReasoningClient::new(config.command.clone())),
        Backend::Http => Box::new(HttpReasoningClient::new(
            config.endpoint.clone(),
            config.api_key_env.clone(),
            config.max_tokens,
        )),
    }
}

/// Cut service output down for error messages.
fn truncate_message(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("  short  ", 10), "short");
        assert_eq!(truncate_message("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_message("ääää", 2), "ää...");
    }
}
