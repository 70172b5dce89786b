//! Deterministic stand-ins for the external reasoning service.

use agdiff_types::{ReasoningClient, ReasoningContext, ReasoningError};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Replays canned replies in order and records every prompt it receives.
///
/// Once the script runs out, the last reply is repeated.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    calls: Mutex<Vec<(String, ReasoningContext)>>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new([reply])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.iter().map(|(p, _)| p.clone()).collect())
            .unwrap_or_default()
    }

    pub fn contexts(&self) -> Vec<ReasoningContext> {
        self.calls
            .lock()
            .map(|c| c.iter().map(|(_, ctx)| ctx.clone()).collect())
            .unwrap_or_default()
    }
}

impl ReasoningClient for ScriptedClient {
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> Result<String, ReasoningError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), context.clone()));
        }

        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let mut last = self
            .last
            .lock()
            .map_err(|_| ReasoningError::Unavailable("scripted client poisoned".to_string()))?;

        match next {
            Some(reply) => {
                *last = Some(reply.clone());
                Ok(reply)
            }
            None => last
                .clone()
                .ok_or_else(|| ReasoningError::Unavailable("no scripted reply".to_string())),
        }
    }
}

/// Always fails with the configured error and counts attempts.
pub struct FailingClient {
    make_error: Box<dyn Fn() -> ReasoningError + Send + Sync>,
    attempts: Mutex<usize>,
}

impl FailingClient {
    pub fn unavailable(message: &str) -> Self {
        let message = message.to_string();
        Self::with(move || ReasoningError::Unavailable(message.clone()))
    }

    pub fn timeout(after: Duration) -> Self {
        Self::with(move || ReasoningError::Timeout(after))
    }

    pub fn status(code: i32, message: &str) -> Self {
        let message = message.to_string();
        Self::with(move || ReasoningError::Status {
            code,
            message: message.clone(),
        })
    }

    fn with(make_error: impl Fn() -> ReasoningError + Send + Sync + 'static) -> Self {
        Self {
            make_error: Box::new(make_error),
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|a| *a).unwrap_or(0)
    }
}

impl ReasoningClient for FailingClient {
    fn submit(
        &self,
        _prompt: &str,
        _context: &ReasoningContext,
    ) -> Result<String, ReasoningError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            *attempts += 1;
        }
        Err((self.make_error)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_client_replays_then_repeats_last() {
        let client = ScriptedClient::new(["first", "second"]);
        let ctx = ReasoningContext::new(".", "test-model");

        assert_eq!(client.submit("a", &ctx).unwrap(), "first");
        assert_eq!(client.submit("b", &ctx).unwrap(), "second");
        assert_eq!(client.submit("c", &ctx).unwrap(), "second");
        assert_eq!(client.prompts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failing_client_counts_attempts() {
        let client = FailingClient::timeout(Duration::from_secs(5));
        let ctx = ReasoningContext::new(".", "test-model");

        let err = client.submit("a", &ctx).unwrap_err();
        assert!(matches!(err, ReasoningError::Timeout(_)));
        assert_eq!(client.attempts(), 1);
    }
}
