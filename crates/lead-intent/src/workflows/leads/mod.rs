//! Lead intent scoring: rule signals, LLM intent classification, and the
//! session-scoped service and HTTP routes built around them.
//!
//! The scoring core (`scoring` and `classifier`) is stateless. Offer, lead, and
//! result storage lives behind [`ScoringRepository`], owned by the caller.

pub mod classifier;
pub mod domain;
pub mod export;
pub mod ingest;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{ChatCompletionClassifier, Classification, IntentClassifier};
pub use domain::{IntentLabel, Lead, Offer, ScoreResult};
pub use export::{results_to_csv, write_results_csv, RESULT_COLUMNS};
pub use ingest::{LeadCsvImporter, LeadImportError, REQUIRED_COLUMNS};
pub use repository::{RepositoryError, ScoringRepository};
pub use router::lead_router;
pub use scoring::{run_pipeline, score_lead, RuleBreakdown};
pub use service::{LeadScoringService, ScoringServiceError};
