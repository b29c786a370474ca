use super::domain::{Lead, Offer, ScoreResult};

/// Per-session storage for the active offer, uploaded leads, and last results.
///
/// Every `set_offer` or `set_leads` moves the session to a new generation.
/// Results are only accepted for the generation they were computed against,
/// so a scoring run that overlaps an offer or lead change cannot publish
/// results for inputs that are no longer current.
pub trait ScoringRepository: Send + Sync {
    fn set_offer(&self, offer: Offer) -> Result<(), RepositoryError>;
    fn offer(&self) -> Result<Option<Offer>, RepositoryError>;
    fn set_leads(&self, leads: Vec<Lead>) -> Result<(), RepositoryError>;
    fn leads(&self) -> Result<Vec<Lead>, RepositoryError>;
    fn generation(&self) -> Result<u64, RepositoryError>;
    /// Store results computed at `generation`. Returns `false`, storing
    /// nothing, when the session has moved on since then.
    fn set_results(
        &self,
        generation: u64,
        results: Vec<ScoreResult>,
    ) -> Result<bool, RepositoryError>;
    fn results(&self) -> Result<Vec<ScoreResult>, RepositoryError>;
    fn clear_results(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
