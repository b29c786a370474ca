use super::super::domain::{Lead, Offer};
use serde::{Deserialize, Serialize};

pub const DECISION_MAKER_POINTS: u8 = 20;
pub const INFLUENCER_POINTS: u8 = 10;
pub const EXACT_INDUSTRY_POINTS: u8 = 20;
pub const ADJACENT_INDUSTRY_POINTS: u8 = 10;
pub const COMPLETENESS_POINTS: u8 = 10;
pub const RULE_SCORE_CAP: u8 = 50;

/// Titles that own the buying decision. Checked in order; the first hit wins.
pub const DECISION_MAKER_TITLES: &[&str] = &[
    "founder",
    "co-founder",
    "ceo",
    "chief executive",
    "cto",
    "cpo",
    "head of growth",
    "vp growth",
    "vp marketing",
    "head of marketing",
    "director of marketing",
    "growth lead",
    "product lead",
    "head of sales",
    "vp sales",
];

/// Titles that shape a purchase without owning it. Only consulted when no
/// decision-maker title matched.
pub const INFLUENCER_TITLES: &[&str] = &[
    "growth",
    "marketing",
    "demand generation",
    "product",
    "revenue operations",
    "sales operations",
    "business development",
];

/// Broad market terms that count as adjacent to most B2B offers.
pub const ADJACENT_INDUSTRY_TERMS: &[&str] = &[
    "saas",
    "software",
    "technology",
    "b2b",
    "startup",
    "mid-market",
    "enterprise",
];

/// How closely a lead's industry or bio lines up with the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryFit {
    Exact,
    Adjacent,
    None,
}

impl IndustryFit {
    pub const fn points(self) -> u8 {
        match self {
            IndustryFit::Exact => EXACT_INDUSTRY_POINTS,
            IndustryFit::Adjacent => ADJACENT_INDUSTRY_POINTS,
            IndustryFit::None => 0,
        }
    }
}

/// Per-component rule points so a score can be audited after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBreakdown {
    pub role: u8,
    pub industry: u8,
    pub completeness: u8,
    pub total: u8,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

// Plain substring containment: "cto" also matches inside "director".
fn first_contained<'a>(haystack: &str, terms: &[&'a str]) -> Option<&'a str> {
    terms.iter().copied().find(|term| haystack.contains(term))
}

pub fn score_role(role: &str) -> u8 {
    let role = normalize(role);
    if first_contained(&role, DECISION_MAKER_TITLES).is_some() {
        return DECISION_MAKER_POINTS;
    }
    if first_contained(&role, INFLUENCER_TITLES).is_some() {
        return INFLUENCER_POINTS;
    }
    0
}

pub fn industry_fit(offer: &Offer, lead: &Lead) -> IndustryFit {
    let industry = normalize(&lead.industry);
    let bio = normalize(&lead.linkedin_bio);

    let exact = offer
        .ideal_use_cases
        .iter()
        .map(|use_case| normalize(use_case))
        .any(|token| !token.is_empty() && (industry.contains(&token) || bio.contains(&token)));
    if exact {
        return IndustryFit::Exact;
    }

    let adjacent = ADJACENT_INDUSTRY_TERMS
        .iter()
        .any(|term| industry.contains(term) || bio.contains(term));
    if adjacent {
        IndustryFit::Adjacent
    } else {
        IndustryFit::None
    }
}

pub fn score_industry(offer: &Offer, lead: &Lead) -> u8 {
    industry_fit(offer, lead).points()
}

pub fn score_completeness(lead: &Lead) -> u8 {
    if lead.fields().iter().all(|field| !field.trim().is_empty()) {
        COMPLETENESS_POINTS
    } else {
        0
    }
}

pub fn rule_breakdown(offer: &Offer, lead: &Lead) -> RuleBreakdown {
    let role = score_role(&lead.role);
    let industry = score_industry(offer, lead);
    let completeness = score_completeness(lead);
    let total = role
        .saturating_add(industry)
        .saturating_add(completeness)
        .min(RULE_SCORE_CAP);

    RuleBreakdown {
        role,
        industry,
        completeness,
        total,
    }
}

pub fn rule_score(offer: &Offer, lead: &Lead) -> u8 {
    rule_breakdown(offer, lead).total
}

#[cfg(test)]
pub(crate) fn matched_title_for_tests(role: &str) -> Option<&'static str> {
    let role = normalize(role);
    first_contained(&role, DECISION_MAKER_TITLES)
        .or_else(|| first_contained(&role, INFLUENCER_TITLES))
}
