use lead_intent::workflows::leads::{Lead, Offer, RepositoryError, ScoreResult, ScoringRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Session {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    generation: u64,
    results: Vec<ScoreResult>,
}

/// Process-local session store. Contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScoringRepository {
    session: Arc<Mutex<Session>>,
}

impl InMemoryScoringRepository {
    fn session(&self) -> Result<MutexGuard<'_, Session>, RepositoryError> {
        self.session
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session mutex poisoned".to_string()))
    }
}

impl ScoringRepository for InMemoryScoringRepository {
    fn set_offer(&self, offer: Offer) -> Result<(), RepositoryError> {
        let mut session = self.session()?;
        session.offer = Some(offer);
        session.generation += 1;
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, RepositoryError> {
        Ok(self.session()?.offer.clone())
    }

    fn set_leads(&self, leads: Vec<Lead>) -> Result<(), RepositoryError> {
        let mut session = self.session()?;
        session.leads = leads;
        session.generation += 1;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, RepositoryError> {
        Ok(self.session()?.leads.clone())
    }

    fn generation(&self) -> Result<u64, RepositoryError> {
        Ok(self.session()?.generation)
    }

    fn set_results(
        &self,
        generation: u64,
        results: Vec<ScoreResult>,
    ) -> Result<bool, RepositoryError> {
        let mut session = self.session()?;
        if session.generation != generation {
            return Ok(false);
        }
        session.results = results;
        Ok(true)
    }

    fn results(&self) -> Result<Vec<ScoreResult>, RepositoryError> {
        Ok(self.session()?.results.clone())
    }

    fn clear_results(&self) -> Result<(), RepositoryError> {
        self.session()?.results.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_intent::workflows::leads::IntentLabel;

    fn offer() -> Offer {
        Offer {
            name: "AI Outreach Automation".to_string(),
            value_props: Vec::new(),
            ideal_use_cases: vec!["B2B SaaS".to_string()],
        }
    }

    fn result() -> ScoreResult {
        ScoreResult {
            name: "Ava Patel".to_string(),
            role: "CEO".to_string(),
            company: "FlowMetrics".to_string(),
            industry: "SaaS".to_string(),
            location: "Austin".to_string(),
            intent: IntentLabel::High,
            score: 90,
            reasoning: "Budget owner.".to_string(),
        }
    }

    #[test]
    fn clones_share_one_session() {
        let repository = InMemoryScoringRepository::default();
        let handle = repository.clone();

        repository.set_offer(offer()).expect("offer stored");
        let generation = repository.generation().expect("generation");
        assert!(repository
            .set_results(generation, vec![result()])
            .expect("results stored"));

        assert_eq!(handle.offer().expect("offer"), Some(offer()));
        assert_eq!(handle.results().expect("results").len(), 1);

        handle.clear_results().expect("cleared");
        assert!(repository.results().expect("results").is_empty());
        assert_eq!(repository.offer().expect("offer"), Some(offer()));
    }

    #[test]
    fn results_from_an_older_generation_are_rejected() {
        let repository = InMemoryScoringRepository::default();
        repository.set_offer(offer()).expect("offer stored");
        let generation = repository.generation().expect("generation");

        repository.set_leads(Vec::new()).expect("leads replaced");
        let stored = repository
            .set_results(generation, vec![result()])
            .expect("repository available");

        assert!(!stored);
        assert!(repository.results().expect("results").is_empty());
        assert_eq!(repository.generation().expect("generation"), generation + 1);
    }

    #[test]
    fn starts_empty() {
        let repository = InMemoryScoringRepository::default();

        assert_eq!(repository.offer().expect("offer"), None);
        assert!(repository.leads().expect("leads").is_empty());
        assert!(repository.results().expect("results").is_empty());
    }
}
