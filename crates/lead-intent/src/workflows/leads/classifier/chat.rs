use std::sync::OnceLock;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::{Classification, IntentClassifier};
use crate::config::ClassifierConfig;
use crate::workflows::leads::domain::{Lead, Offer};

/// Classifier talking to an OpenAI-compatible `/chat/completions` endpoint.
///
/// Uses reqwest's blocking client, so `classify` must run off the async
/// runtime's worker threads (the HTTP layer wraps scoring in `spawn_blocking`).
/// The client is built lazily on the first classified lead.
pub struct ChatCompletionClassifier {
    config: ClassifierConfig,
    client: OnceLock<Result<Client, String>>,
}

impl ChatCompletionClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn client(&self) -> Result<&Client, CompletionError> {
        self.client
            .get_or_init(|| {
                Client::builder()
                    .timeout(self.config.timeout)
                    .build()
                    .map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(|message| CompletionError::Client(message.clone()))
    }

    fn request_completion(
        &self,
        api_key: &str,
        offer: &Offer,
        lead: &Lead,
    ) -> Result<String, CompletionError> {
        let user_prompt = build_user_prompt(offer, lead);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client()?
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let body: ChatResponse = response.json().map_err(CompletionError::Transport)?;
        completion_content(body)
    }
}

impl std::fmt::Debug for ChatCompletionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IntentClassifier for ChatCompletionClassifier {
    fn classify(&self, offer: &Offer, lead: &Lead) -> Classification {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Classification::not_configured();
        };

        match self.request_completion(api_key, offer, lead) {
            Ok(content) => {
                let classification = Classification::from_completion(&content);
                debug!(lead = %lead.name, intent = %classification.intent, "lead classified");
                classification
            }
            Err(CompletionError::Status(status)) => {
                warn!(lead = %lead.name, %status, "intent classifier returned an error status");
                Classification::unavailable()
            }
            Err(err) => {
                warn!(lead = %lead.name, error = %err, "intent classifier call failed");
                Classification::errored()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CompletionError {
    #[error("http client unavailable: {0}")]
    Client(String),
    #[error("completion request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("completion endpoint returned {0}")]
    Status(StatusCode),
    #[error("completion response contained no choices")]
    MissingChoice,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// An absent `choices` key reads as empty text; an empty list is a failure.
fn completion_content(body: ChatResponse) -> Result<String, CompletionError> {
    let Some(choices) = body.choices else {
        return Ok(String::new());
    };
    let choice = choices
        .into_iter()
        .next()
        .ok_or(CompletionError::MissingChoice)?;

    Ok(choice.message.content.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: ChatResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
