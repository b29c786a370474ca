mod combine;
mod rules;

pub use combine::{
    ai_points, ai_points_for_label, combine, HIGH_INTENT_POINTS, LOW_INTENT_POINTS, MAX_SCORE,
    MEDIUM_INTENT_POINTS,
};
pub use rules::{
    industry_fit, rule_breakdown, rule_score, score_completeness, score_industry, score_role,
    IndustryFit, RuleBreakdown, ADJACENT_INDUSTRY_TERMS, DECISION_MAKER_TITLES,
    INFLUENCER_TITLES, RULE_SCORE_CAP,
};
#[cfg(test)]
pub(crate) use rules::matched_title_for_tests;

use super::classifier::IntentClassifier;
use super::domain::{IntentLabel, Lead, Offer, ScoreResult};
use tracing::{debug, info};

/// Score one lead: deterministic rules first, then the classifier, then the clamp.
pub fn score_lead(offer: &Offer, lead: &Lead, classifier: &dyn IntentClassifier) -> ScoreResult {
    let breakdown = rule_breakdown(offer, lead);
    let classification = classifier.classify(offer, lead);
    let score = combine(breakdown.total, ai_points(classification.intent));

    debug!(
        lead = %lead.name,
        role_points = breakdown.role,
        industry_points = breakdown.industry,
        completeness_points = breakdown.completeness,
        intent = %classification.intent,
        score,
        "lead scored"
    );

    ScoreResult {
        name: lead.name.clone(),
        role: lead.role.clone(),
        company: lead.company.clone(),
        industry: lead.industry.clone(),
        location: lead.location.clone(),
        intent: classification.intent,
        score,
        reasoning: classification.reasoning,
    }
}

/// Score every lead in order. One result per lead, no ranking or dedup.
pub fn run_pipeline(
    offer: &Offer,
    leads: &[Lead],
    classifier: &dyn IntentClassifier,
) -> Vec<ScoreResult> {
    let results: Vec<ScoreResult> = leads
        .iter()
        .map(|lead| score_lead(offer, lead, classifier))
        .collect();

    let high = count_intent(&results, IntentLabel::High);
    let medium = count_intent(&results, IntentLabel::Medium);
    let low = count_intent(&results, IntentLabel::Low);
    info!(
        offer = %offer.name,
        leads = results.len(),
        high,
        medium,
        low,
        "scoring run complete"
    );

    results
}

fn count_intent(results: &[ScoreResult], intent: IntentLabel) -> usize {
    results
        .iter()
        .filter(|result| result.intent == intent)
        .count()
}
