//! Turns a raw model completion into a validated [`EvaluationRecord`].
//!
//! The pipeline runs fence stripping, boundary extraction, a direct parse,
//! an escape-sanitizing parse and a truncation-repairing parse, then
//! validates the result. Each step only runs when the previous one could not
//! produce a parsed object. Nothing is logged here: every step records a
//! [`Diagnostic`] that is returned with the result so the caller decides what
//! to log.

mod extract;
mod failure;
mod repair;
mod sanitize;
mod validate;

pub use extract::{json_boundaries, strip_fences};
pub use failure::{Diagnostic, Level, NormalizationFailure, Stage, Step};
pub use repair::{close_truncated, Repaired};
pub use sanitize::sanitize;

use crate::domain::fields::{
    BUSINESS_MODEL, EXISTING_SOLUTIONS, MARKET_POTENTIAL, PITCH_SUMMARY, PROBLEM_STATEMENT,
    PROPOSED_SOLUTION, PROS_CONS_IMPROVEMENTS, SCORES, SWOT_ANALYSIS,
};
use crate::domain::{type_name, EvaluationRecord};
use serde_json::{Map, Value};

/// Ordered, de-duplicated set of field paths that must be present and
/// non-empty. Dotted paths address nested keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields(Vec<String>);

impl RequiredFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields.into_iter().collect()
    }

    /// Top-level sections every evaluation report must carry.
    pub fn evaluation() -> Self {
        Self::new([
            PROBLEM_STATEMENT,
            EXISTING_SOLUTIONS,
            PROPOSED_SOLUTION,
            MARKET_POTENTIAL,
            SWOT_ANALYSIS,
            BUSINESS_MODEL,
            PROS_CONS_IMPROVEMENTS,
            PITCH_SUMMARY,
            SCORES,
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::evaluation()
    }
}

impl<S: Into<String>> FromIterator<S> for RequiredFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut fields: Vec<String> = Vec::new();
        for field in iter {
            let field = field.into();
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Self(fields)
    }
}

/// How much work it took to get a parseable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Direct,
    Sanitized,
    Repaired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: EvaluationRecord,
    pub recovery: Recovery,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn normalize(
    raw: &str,
    required: &RequiredFields,
) -> Result<EvaluationRecord, NormalizationFailure> {
    normalize_traced(raw, required).map(|normalized| normalized.record)
}

/// Same as [`normalize`], also reporting the recovery level and the
/// diagnostics of a successful run.
pub fn normalize_traced(
    raw: &str,
    required: &RequiredFields,
) -> Result<Normalized, NormalizationFailure> {
    let mut run = Run::default();

    let candidate = run
        .extract(raw)
        .map_err(|reason| NormalizationFailure::Extraction {
            reason,
            diagnostics: run.take(),
        })?;

    let (fields, recovery) = run
        .parse(candidate)
        .map_err(|message| NormalizationFailure::Parse {
            message,
            diagnostics: run.take(),
        })?;

    run.validate(&fields, required)
        .map_err(|violations| NormalizationFailure::Validation {
            missing: violations.missing,
            invalid: violations.invalid,
            diagnostics: run.take(),
        })?;

    Ok(Normalized {
        record: EvaluationRecord::from_validated(fields),
        recovery,
        diagnostics: run.take(),
    })
}

#[derive(Default)]
struct Run {
    diagnostics: Vec<Diagnostic>,
}

impl Run {
    fn record(&mut self, level: Level, step: Step, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            level,
            step,
            message: message.into(),
        });
    }

    fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn extract<'a>(&mut self, raw: &'a str) -> Result<&'a str, String> {
        let text = match strip_fences(raw) {
            Some(inner) => {
                self.record(Level::Debug, Step::FenceStrip, "removed markdown code fence");
                inner
            }
            None => raw,
        };

        match json_boundaries(text) {
            Ok(candidate) => {
                self.record(
                    Level::Debug,
                    Step::Boundaries,
                    format!("candidate is {} of {} bytes", candidate.len(), raw.len()),
                );
                Ok(candidate)
            }
            Err(reason) => {
                self.record(Level::Warn, Step::Boundaries, reason.clone());
                Err(reason)
            }
        }
    }

    fn parse(&mut self, candidate: &str) -> Result<(Map<String, Value>, Recovery), String> {
        let err = match parse_object(candidate) {
            Ok(fields) => return Ok((fields, Recovery::Direct)),
            Err(err) => err,
        };
        self.record(Level::Warn, Step::DirectParse, err);

        let sanitized = sanitize(candidate);
        let err = match parse_object(&sanitized) {
            Ok(fields) => {
                self.record(Level::Info, Step::Sanitize, "parsed after escape sanitization");
                return Ok((fields, Recovery::Sanitized));
            }
            Err(err) => err,
        };
        self.record(Level::Warn, Step::Sanitize, err);

        let repaired = close_truncated(&sanitized);
        self.record(
            Level::Info,
            Step::Repair,
            format!(
                "cut at {:?}, appended {} ']' and {} '}}'",
                repaired.cut_at, repaired.brackets_added, repaired.braces_added
            ),
        );

        match parse_object(&repaired.text) {
            Ok(fields) => Ok((fields, Recovery::Repaired)),
            Err(err) => {
                self.record(Level::Warn, Step::Repair, err.clone());
                Err(err)
            }
        }
    }

    fn validate(
        &mut self,
        fields: &Map<String, Value>,
        required: &RequiredFields,
    ) -> Result<(), validate::Violations> {
        let result = validate::check(fields, required);
        if let Err(violations) = &result {
            self.record(
                Level::Warn,
                Step::Validate,
                format!(
                    "missing {:?}, non-numeric {:?}, present keys {:?}",
                    violations.missing,
                    violations.invalid,
                    fields.keys().collect::<Vec<_>>()
                ),
            );
        }
        result
    }
}

fn parse_object(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Object(fields) => Ok(fields),
        other => Err(format!("expected a JSON object, found {}", type_name(&other))),
    }
}
