use super::truncate_message;
use agdiff_types::{ReasoningClient, ReasoningContext, ReasoningError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_ERROR_CONTENT_LEN: usize = 200;

/// Posts prompts to a Messages-style HTTP endpoint.
///
/// The API key is read from the named environment variable on every call,
/// so a missing key surfaces as an unavailable service rather than a setup
/// error. The working directory in the context has no meaning here.
#[derive(Debug, Clone)]
pub struct HttpReasoningClient {
    endpoint: String,
    api_key_env: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl HttpReasoningClient {
    pub fn new(endpoint: String, api_key_env: String, max_tokens: u32) -> Self {
        Self {
            endpoint,
            api_key_env,
            max_tokens,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> std::result::Result<String, ReasoningError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ReasoningError::Unavailable(format!(
                "environment variable {} is not set",
                self.api_key_env
            ))),
        }
    }
}

impl ReasoningClient for HttpReasoningClient {
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> std::result::Result<String, ReasoningError> {
        let api_key = self.api_key()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(context.timeout)
            .build()
            .map_err(|err| {
                ReasoningError::Transport(format!("failed to create HTTP client: {}", err))
            })?;

        let body = MessagesRequest {
            model: &context.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(endpoint = %self.endpoint, model = %context.model, "posting reasoning request");
        let response = client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .map_err(|err| map_transport_error(err, context))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| map_transport_error(err, context))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "reasoning endpoint returned an error");
            return Err(ReasoningError::Status {
                code: i32::from(status.as_u16()),
                message: truncate_message(&text, MAX_ERROR_CONTENT_LEN),
            });
        }

        extract_reply(&text)
    }
}

fn map_transport_error(err: reqwest::Error, context: &ReasoningContext) -> ReasoningError {
    if err.is_timeout() {
        ReasoningError::Timeout(context.timeout)
    } else if err.is_connect() {
        ReasoningError::Unavailable(err.to_string())
    } else {
        ReasoningError::Transport(err.to_string())
    }
}

/// First text block of a Messages response.
fn extract_reply(body: &str) -> std::result::Result<String, ReasoningError> {
    let response: MessagesResponse = serde_json::from_str(body).map_err(|err| {
        ReasoningError::Transport(format!("malformed response body: {}", err))
    })?;

    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .ok_or(ReasoningError::EmptyReply)
}
