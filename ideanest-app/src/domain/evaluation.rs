use ideanest_errors::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROBLEM_STATEMENT: &str = "problemStatement";
pub const EXISTING_SOLUTIONS: &str = "existingSolutions";
pub const PROPOSED_SOLUTION: &str = "proposedSolution";
pub const MARKET_POTENTIAL: &str = "marketPotential";
pub const BUSINESS_MODEL: &str = "businessModel";
pub const PITCH_SUMMARY: &str = "pitchSummary";
pub const SWOT_ANALYSIS: &str = "swotAnalysis";
pub const PROS_CONS_IMPROVEMENTS: &str = "prosConsImprovements";
pub const SCORES: &str = "scores";

pub const SCORE_FIELDS: [&str; 3] = ["innovation", "feasibility", "scalability"];

/// A validated VC evaluation report.
///
/// The parsed object is kept exactly as the model produced it, including keys
/// this crate does not know about. Typed views over the nested sections are
/// built on demand and fall back to empty values when a section is absent or
/// shaped unexpectedly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationRecord(Map<String, Value>);

impl EvaluationRecord {
    pub(crate) fn from_validated(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Rebuilds a record that was validated before it was stored.
    pub fn from_stored(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(AppError::Internal(format!(
                "stored evaluation is not a JSON object: {}",
                type_name(&other)
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn problem_statement(&self) -> &str {
        self.text(PROBLEM_STATEMENT)
    }

    pub fn existing_solutions(&self) -> &str {
        self.text(EXISTING_SOLUTIONS)
    }

    pub fn proposed_solution(&self) -> &str {
        self.text(PROPOSED_SOLUTION)
    }

    pub fn market_potential(&self) -> &str {
        self.text(MARKET_POTENTIAL)
    }

    pub fn business_model(&self) -> &str {
        self.text(BUSINESS_MODEL)
    }

    pub fn pitch_summary(&self) -> &str {
        self.text(PITCH_SUMMARY)
    }

    pub fn scores(&self) -> Scores {
        let score = |name: &str| {
            self.0
                .get(SCORES)
                .and_then(|s| s.get(name))
                .and_then(Value::as_f64)
                .unwrap_or_default()
        };

        Scores {
            innovation: score("innovation"),
            feasibility: score("feasibility"),
            scalability: score("scalability"),
        }
    }

    pub fn swot_analysis(&self) -> SwotAnalysis {
        self.section(SWOT_ANALYSIS).unwrap_or_default()
    }

    pub fn pros_cons_improvements(&self) -> ProsConsImprovements {
        self.section(PROS_CONS_IMPROVEMENTS).unwrap_or_default()
    }

    pub fn refined_versions(&self) -> Vec<RefinedVersion> {
        self.section("refinedVersions").unwrap_or_default()
    }

    pub fn competitors(&self) -> Vec<Competitor> {
        self.section("competitors").unwrap_or_default()
    }

    pub fn market_strategy(&self) -> Option<MarketStrategy> {
        self.section("marketStrategy")
    }

    pub fn pitch_deck(&self) -> Option<PitchDeck> {
        self.section("pitchDeck")
    }

    fn section<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .filter(|v| !v.is_null())
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub innovation: f64,
    pub feasibility: f64,
    pub scalability: f64,
}

impl Scores {
    pub fn overall(&self) -> f64 {
        (self.innovation + self.feasibility + self.scalability) / 3.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsConsImprovements {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefinedVersion {
    pub title: String,
    pub description: String,
    pub why_it_works: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub description: String,
    pub pricing: Option<String>,
    pub market_share: Option<String>,
    pub key_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketStrategy {
    pub target_audience: String,
    pub go_to_market: String,
    pub revenue_model: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PitchDeck {
    pub problem: String,
    pub solution: String,
    pub market_size: String,
    pub business_model: String,
    pub traction: String,
    pub competition: String,
    pub team: String,
    pub financials: String,
    pub ask: String,
}

impl PitchDeck {
    /// Slides in presentation order.
    pub fn slides(&self) -> [(&'static str, &str); 9] {
        [
            ("Problem", self.problem.as_str()),
            ("Solution", self.solution.as_str()),
            ("Market Size", self.market_size.as_str()),
            ("Business Model", self.business_model.as_str()),
            ("Traction", self.traction.as_str()),
            ("Competition", self.competition.as_str()),
            ("Team", self.team.as_str()),
            ("Financials", self.financials.as_str()),
            ("The Ask", self.ask.as_str()),
        ]
    }
}
