use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::leads::classifier::{Classification, IntentClassifier};
use crate::workflows::leads::domain::{IntentLabel, Lead, Offer, ScoreResult};
use crate::workflows::leads::repository::{RepositoryError, ScoringRepository};
use crate::workflows::leads::{lead_router, LeadScoringService};

pub(super) const LEAD_CSV: &str = "name,role,company,industry,location,linkedin_bio\n\
Ava Patel,Head of Growth,FlowMetrics,B2B SaaS mid-market,Austin,Scaling outbound at FlowMetrics\n\
Liam Chen,Marketing Manager,Brightly,Retail,Chicago,Runs seasonal campaigns\n\
Mia Rossi,,,,,\n";

pub(super) fn offer() -> Offer {
    Offer {
        name: "AI Outreach Automation".to_string(),
        value_props: vec!["24/7 outreach".to_string(), "6x more meetings".to_string()],
        ideal_use_cases: vec!["B2B SaaS mid-market".to_string()],
    }
}

pub(super) fn lead(name: &str, role: &str, industry: &str) -> Lead {
    Lead {
        name: name.to_string(),
        role: role.to_string(),
        company: "FlowMetrics".to_string(),
        industry: industry.to_string(),
        location: "Austin".to_string(),
        linkedin_bio: "Leads a small revenue team".to_string(),
    }
}

pub(super) fn empty_lead() -> Lead {
    Lead {
        name: String::new(),
        role: String::new(),
        company: String::new(),
        industry: String::new(),
        location: String::new(),
        linkedin_bio: String::new(),
    }
}

pub(super) fn batch() -> Vec<Lead> {
    vec![
        lead("Ava Patel", "Founder", "B2B SaaS mid-market"),
        lead("Liam Chen", "Marketing Manager", "Retail"),
        lead("Noah Kim", "Accountant", "Manufacturing"),
        empty_lead(),
    ]
}

/// Classifier returning a fixed answer and counting how often it was asked.
pub(super) struct FixedClassifier {
    classification: Classification,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub(super) fn new(intent: IntentLabel, reasoning: &str) -> Self {
        Self {
            classification: Classification::new(intent, reasoning),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IntentClassifier for FixedClassifier {
    fn classify(&self, _offer: &Offer, _lead: &Lead) -> Classification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.classification.clone()
    }
}

/// Classifier that answers based on the lead's role, so order mixups show up.
pub(super) struct RoleEchoClassifier;

impl IntentClassifier for RoleEchoClassifier {
    fn classify(&self, _offer: &Offer, lead: &Lead) -> Classification {
        Classification::from_completion(&format!("role={} looks medium", lead.role))
    }
}

/// Classifier that parks on its first call until the test releases it.
pub(super) struct GatedClassifier {
    entered: Barrier,
    release: Barrier,
    gated: AtomicBool,
}

impl GatedClassifier {
    pub(super) fn new() -> Self {
        Self {
            entered: Barrier::new(2),
            release: Barrier::new(2),
            gated: AtomicBool::new(true),
        }
    }

    /// Blocks until a scoring run is inside its first classifier call.
    pub(super) fn wait_until_entered(&self) {
        self.entered.wait();
    }

    pub(super) fn release(&self) {
        self.release.wait();
    }
}

impl IntentClassifier for GatedClassifier {
    fn classify(&self, _offer: &Offer, _lead: &Lead) -> Classification {
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.release.wait();
        }
        Classification::new(IntentLabel::High, "gated")
    }
}

#[derive(Default)]
struct Session {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    generation: u64,
    results: Vec<ScoreResult>,
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    session: Mutex<Session>,
}

impl MemoryRepository {
    fn session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().expect("session mutex poisoned")
    }
}

impl ScoringRepository for MemoryRepository {
    fn set_offer(&self, offer: Offer) -> Result<(), RepositoryError> {
        let mut session = self.session();
        session.offer = Some(offer);
        session.generation += 1;
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, RepositoryError> {
        Ok(self.session().offer.clone())
    }

    fn set_leads(&self, leads: Vec<Lead>) -> Result<(), RepositoryError> {
        let mut session = self.session();
        session.leads = leads;
        session.generation += 1;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, RepositoryError> {
        Ok(self.session().leads.clone())
    }

    fn generation(&self) -> Result<u64, RepositoryError> {
        Ok(self.session().generation)
    }

    fn set_results(
        &self,
        generation: u64,
        results: Vec<ScoreResult>,
    ) -> Result<bool, RepositoryError> {
        let mut session = self.session();
        if session.generation != generation {
            return Ok(false);
        }
        session.results = results;
        Ok(true)
    }

    fn results(&self) -> Result<Vec<ScoreResult>, RepositoryError> {
        Ok(self.session().results.clone())
    }

    fn clear_results(&self) -> Result<(), RepositoryError> {
        self.session().results.clear();
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ScoringRepository for UnavailableRepository {
    fn set_offer(&self, _offer: Offer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn offer(&self) -> Result<Option<Offer>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn set_leads(&self, _leads: Vec<Lead>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn leads(&self) -> Result<Vec<Lead>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn generation(&self) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn set_results(
        &self,
        _generation: u64,
        _results: Vec<ScoreResult>,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn results(&self) -> Result<Vec<ScoreResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn clear_results(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service(
    classifier: FixedClassifier,
) -> (
    LeadScoringService<MemoryRepository, FixedClassifier>,
    Arc<MemoryRepository>,
    Arc<FixedClassifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let classifier = Arc::new(classifier);
    let service = LeadScoringService::new(repository.clone(), classifier.clone());
    (service, repository, classifier)
}

pub(super) fn router_with_service(
    service: LeadScoringService<MemoryRepository, FixedClassifier>,
) -> axum::Router {
    lead_router(Arc::new(service))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn multipart_upload(field: &str, file_name: &str, contents: &str) -> (String, String) {
    let boundary = "lead-intent-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
Content-Type: text/csv\r\n\r\n\
{contents}\r\n\
--{boundary}--\r\n"
    );
    (format!("multipart/form-data; boundary={boundary}"), body)
}
