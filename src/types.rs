//! Profile records, index metadata and search outcomes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Position of a profile in the source sequence. Stable for one index build.
pub type ProfileId = u64;

/// Metadata record stored next to a vector and returned by the index.
///
/// This is external data: fields may be missing or hold unexpected types.
pub type Metadata = Map<String, Value>;

/// Metadata key holding the experience value the filter reasons about
pub const EXPERIENCE_KEY: &str = "experience_years";

/// A candidate profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub location: String,
    /// Free text, comma separated
    pub skills: String,
    pub experience_years: u32,
    pub summary: String,
    /// Text that gets embedded: name, skills and summary
    pub raw_text: String,
}

impl Profile {
    /// Create a profile, deriving `raw_text` from name, skills and summary
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        location: impl Into<String>,
        skills: impl Into<String>,
        experience_years: u32,
        summary: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let skills = skills.into();
        let summary = summary.into();
        let raw_text = format!("{} {} {}", name, skills, summary);

        Self {
            name,
            email: email.into(),
            location: location.into(),
            skills,
            experience_years,
            summary,
            raw_text,
        }
    }

    /// Full metadata record for the vector index
    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Map::new();
        meta.insert("name".into(), Value::from(self.name.clone()));
        meta.insert("email".into(), Value::from(self.email.clone()));
        meta.insert("location".into(), Value::from(self.location.clone()));
        meta.insert("skills".into(), Value::from(self.skills.clone()));
        meta.insert(EXPERIENCE_KEY.into(), Value::from(self.experience_years));
        meta.insert("summary".into(), Value::from(self.summary.clone()));
        meta.insert("raw_text".into(), Value::from(self.raw_text.clone()));
        meta
    }
}

/// Result of coercing a metadata record's experience value to an integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Experience {
    Years(i64),
    Missing,
    /// Present but not an integer; holds the offending value as text
    Invalid(String),
}

impl Experience {
    /// Coerce `experience_years` from a metadata record.
    ///
    /// Integers and integer strings are accepted, floats truncate toward zero.
    pub fn from_metadata(meta: &Metadata) -> Self {
        match meta.get(EXPERIENCE_KEY) {
            None => Experience::Missing,
            Some(value) => Self::from_value(value),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Experience::Years(i)
                } else if let Some(f) = n.as_f64() {
                    if f.is_finite() && f.abs() < i64::MAX as f64 {
                        Experience::Years(f.trunc() as i64)
                    } else {
                        Experience::Invalid(n.to_string())
                    }
                } else {
                    // u64 beyond i64::MAX
                    Experience::Invalid(n.to_string())
                }
            }
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(i) => Experience::Years(i),
                Err(_) => Experience::Invalid(s.clone()),
            },
            other => Experience::Invalid(other.to_string()),
        }
    }

    pub fn years(&self) -> Option<i64> {
        match self {
            Experience::Years(y) => Some(*y),
            _ => None,
        }
    }
}

/// One entry of the ranked pool returned by the vector index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: ProfileId,
    /// Similarity score, higher is better
    pub score: f32,
    pub metadata: Metadata,
}

impl Candidate {
    pub fn experience(&self) -> Experience {
        Experience::from_metadata(&self.metadata)
    }

    /// String field from metadata, empty when absent
    pub fn field(&self, key: &str) -> String {
        match self.metadata.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Tri-state result handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Query rejected before any search work
    ValidationError { message: String },
    /// Search ran but nothing survived the filter
    NoResults {
        query: String,
        threshold: Option<u32>,
    },
    Results {
        query: String,
        threshold: Option<u32>,
        /// Survivors in similarity order, capped for display
        profiles: Vec<Candidate>,
        /// Survivors before the display cap
        total_matches: usize,
    },
}

impl SearchOutcome {
    pub fn profiles(&self) -> &[Candidate] {
        match self {
            SearchOutcome::Results { profiles, .. } => profiles,
            _ => &[],
        }
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, SearchOutcome::ValidationError { .. })
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, SearchOutcome::NoResults { .. })
    }
}
