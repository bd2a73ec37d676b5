use std::fmt;

/// Pipeline stage a normalization failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Parse,
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extraction => "extraction",
            Stage::Parse => "parse",
            Stage::Validation => "validation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

/// Individual step that emitted a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FenceStrip,
    Boundaries,
    DirectParse,
    Sanitize,
    Repair,
    Validate,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::FenceStrip => "fence-strip",
            Step::Boundaries => "boundaries",
            Step::DirectParse => "direct-parse",
            Step::Sanitize => "sanitize",
            Step::Repair => "repair",
            Step::Validate => "validate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub step: Step,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.level, self.step, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizationFailure {
    #[error("no JSON object in completion: {reason}")]
    Extraction {
        reason: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("completion is not valid JSON after sanitize and repair: {message}")]
    Parse {
        message: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("evaluation failed validation: {}", describe_violations(.missing, .invalid))]
    Validation {
        missing: Vec<String>,
        invalid: Vec<String>,
        diagnostics: Vec<Diagnostic>,
    },
}

impl NormalizationFailure {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Extraction { .. } => Stage::Extraction,
            Self::Parse { .. } => Stage::Parse,
            Self::Validation { .. } => Stage::Validation,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Extraction { diagnostics, .. }
            | Self::Parse { diagnostics, .. }
            | Self::Validation { diagnostics, .. } => diagnostics,
        }
    }

    /// Required fields that were absent, null or empty.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::Validation { missing, .. } => missing,
            _ => &[],
        }
    }

    /// Fields that were present but had the wrong type.
    pub fn invalid_fields(&self) -> &[String] {
        match self {
            Self::Validation { invalid, .. } => invalid,
            _ => &[],
        }
    }
}

fn describe_violations(missing: &[String], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing required fields: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("non-numeric scores: {}", invalid.join(", ")));
    }
    parts.join("; ")
}
