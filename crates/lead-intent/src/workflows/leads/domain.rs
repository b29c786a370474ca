use serde::{Deserialize, Serialize};

/// Product or service being pitched to the uploaded leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

/// Prospect record as uploaded by the caller. Empty fields are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
}

impl Lead {
    /// All six descriptive fields in upload column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.role.as_str(),
            self.company.as_str(),
            self.industry.as_str(),
            self.location.as_str(),
            self.linkedin_bio.as_str(),
        ]
    }
}

/// Qualitative buying-readiness label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLabel {
    High,
    Medium,
    Low,
}

impl IntentLabel {
    pub const fn label(self) -> &'static str {
        match self {
            IntentLabel::High => "High",
            IntentLabel::Medium => "Medium",
            IntentLabel::Low => "Low",
        }
    }

    /// Exact label lookup; anything else is rejected.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "High" => Some(IntentLabel::High),
            "Medium" => Some(IntentLabel::Medium),
            "Low" => Some(IntentLabel::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Final per-lead output of the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub intent: IntentLabel,
    pub score: u8,
    pub reasoning: String,
}
