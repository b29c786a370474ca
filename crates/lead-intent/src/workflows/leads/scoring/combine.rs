use super::super::domain::IntentLabel;

pub const HIGH_INTENT_POINTS: u8 = 50;
pub const MEDIUM_INTENT_POINTS: u8 = 30;
pub const LOW_INTENT_POINTS: u8 = 10;
pub const MAX_SCORE: u8 = 100;

pub fn ai_points(intent: IntentLabel) -> u8 {
    match intent {
        IntentLabel::High => HIGH_INTENT_POINTS,
        IntentLabel::Medium => MEDIUM_INTENT_POINTS,
        IntentLabel::Low => LOW_INTENT_POINTS,
    }
}

/// Points for a raw label string. Unrecognized labels earn the Low points.
pub fn ai_points_for_label(label: &str) -> u8 {
    IntentLabel::from_label(label)
        .map(ai_points)
        .unwrap_or(LOW_INTENT_POINTS)
}

/// Clamp the rule and AI points into the published 0..=100 range.
pub fn combine(rule_score: u8, ai_points: u8) -> u8 {
    let total = i32::from(rule_score) + i32::from(ai_points);
    total.clamp(0, i32::from(MAX_SCORE)) as u8
}
