use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::IntentClassifier;
use super::domain::{Lead, Offer, ScoreResult};
use super::export::results_to_csv;
use super::repository::{RepositoryError, ScoringRepository};
use super::scoring::run_pipeline;

/// Service composing the session repository with the scoring pipeline.
pub struct LeadScoringService<R, C> {
    repository: Arc<R>,
    classifier: Arc<C>,
}

impl<R, C> LeadScoringService<R, C>
where
    R: ScoringRepository + 'static,
    C: IntentClassifier + 'static,
{
    pub fn new(repository: Arc<R>, classifier: Arc<C>) -> Self {
        Self {
            repository,
            classifier,
        }
    }

    /// Replace the active offer. Previously computed results no longer apply.
    pub fn set_offer(&self, offer: Offer) -> Result<Offer, ScoringServiceError> {
        self.repository.set_offer(offer.clone())?;
        self.repository.clear_results()?;
        info!(offer = %offer.name, "offer updated");
        Ok(offer)
    }

    /// Replace the lead batch, returning how many leads were stored.
    pub fn upload_leads(&self, leads: Vec<Lead>) -> Result<usize, ScoringServiceError> {
        if leads.is_empty() {
            return Err(ScoringServiceError::EmptyBatch);
        }

        let count = leads.len();
        self.repository.set_leads(leads)?;
        self.repository.clear_results()?;
        info!(count, "lead batch stored");
        Ok(count)
    }

    /// Score the stored leads against the stored offer and keep the results.
    ///
    /// Blocks for the duration of every classifier call; async callers should
    /// run it on a blocking thread. If the offer or leads change while the run
    /// is in flight, the results are returned but not stored.
    pub fn score(&self) -> Result<Vec<ScoreResult>, ScoringServiceError> {
        let generation = self.repository.generation()?;
        let offer = self
            .repository
            .offer()?
            .ok_or(ScoringServiceError::OfferMissing)?;
        let leads = self.repository.leads()?;
        if leads.is_empty() {
            return Err(ScoringServiceError::LeadsMissing);
        }

        let results = run_pipeline(&offer, &leads, self.classifier.as_ref());
        if !self.repository.set_results(generation, results.clone())? {
            warn!(
                offer = %offer.name,
                "offer or leads changed during scoring; results not stored"
            );
        }
        Ok(results)
    }

    pub fn results(&self) -> Result<Vec<ScoreResult>, ScoringServiceError> {
        Ok(self.repository.results()?)
    }

    /// CSV rendering of the last results. Fails when nothing has been scored.
    pub fn results_csv(&self) -> Result<Vec<u8>, ScoringServiceError> {
        let results = self.repository.results()?;
        if results.is_empty() {
            return Err(ScoringServiceError::NoResults);
        }
        results_to_csv(&results).map_err(ScoringServiceError::Export)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("no offer has been set")]
    OfferMissing,
    #[error("no leads have been uploaded")]
    LeadsMissing,
    #[error("lead batch is empty")]
    EmptyBatch,
    #[error("no scoring results are available")]
    NoResults,
    #[error("failed to export results: {0}")]
    Export(csv::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
