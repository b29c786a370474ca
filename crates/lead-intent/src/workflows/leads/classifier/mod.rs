//! Intent classification backed by an external chat-completion service.
//!
//! Every implementation of [`IntentClassifier`] is infallible from the caller's
//! point of view: transport problems, bad status codes, and missing credentials
//! all collapse into a `Low` classification with a fixed explanation so the
//! scoring pipeline always produces a result for each lead.

mod chat;
mod prompt;

pub use chat::ChatCompletionClassifier;
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};

use super::domain::{IntentLabel, Lead, Offer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NOT_CONFIGURED_REASONING: &str = "AI not configured; defaulting to Low.";
pub const UNAVAILABLE_REASONING: &str = "AI unavailable; defaulted to Low.";
pub const ERROR_REASONING: &str = "AI error; defaulted to Low.";

/// Intent label plus the reasoning shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: IntentLabel,
    pub reasoning: String,
}

impl Classification {
    pub fn new(intent: IntentLabel, reasoning: impl Into<String>) -> Self {
        Self {
            intent,
            reasoning: reasoning.into(),
        }
    }

    pub fn not_configured() -> Self {
        Self::new(IntentLabel::Low, NOT_CONFIGURED_REASONING)
    }

    pub fn unavailable() -> Self {
        Self::new(IntentLabel::Low, UNAVAILABLE_REASONING)
    }

    pub fn errored() -> Self {
        Self::new(IntentLabel::Low, ERROR_REASONING)
    }

    /// Map generated text to a label, keeping the trimmed text as reasoning.
    pub fn from_completion(text: &str) -> Self {
        let reasoning = text.trim();
        Self::new(intent_from_text(reasoning), reasoning)
    }
}

/// Keyword scan over model output. "high" beats "medium"; everything else is Low.
pub fn intent_from_text(text: &str) -> IntentLabel {
    let text = text.to_lowercase();
    if text.contains("high") {
        IntentLabel::High
    } else if text.contains("medium") {
        IntentLabel::Medium
    } else {
        IntentLabel::Low
    }
}

/// Capability consumed by the scoring pipeline. Implementations must not fail.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, offer: &Offer, lead: &Lead) -> Classification;
}

impl<T: IntentClassifier + ?Sized> IntentClassifier for Arc<T> {
    fn classify(&self, offer: &Offer, lead: &Lead) -> Classification {
        (**self).classify(offer, lead)
    }
}

impl<T: IntentClassifier + ?Sized> IntentClassifier for Box<T> {
    fn classify(&self, offer: &Offer, lead: &Lead) -> Classification {
        (**self).classify(offer, lead)
    }
}
