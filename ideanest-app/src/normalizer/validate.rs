use crate::domain::fields::{SCORES, SCORE_FIELDS};
use serde_json::{Map, Value};

use super::RequiredFields;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Violations {
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

impl Violations {
    fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    fn mark_missing(&mut self, path: String) {
        if !self.missing.contains(&path) {
            self.missing.push(path);
        }
    }
}

/// Checks required fields and the numeric score triple, collecting every
/// violation instead of stopping at the first.
pub fn check(fields: &Map<String, Value>, required: &RequiredFields) -> Result<(), Violations> {
    let mut violations = Violations::default();

    for path in required.iter() {
        if is_missing(lookup(fields, path)) {
            violations.mark_missing(path.to_string());
        }
    }

    for name in SCORE_FIELDS {
        let path = format!("{SCORES}.{name}");
        match lookup(fields, &path) {
            None | Some(Value::Null) => violations.mark_missing(path),
            Some(Value::Number(_)) => {}
            Some(_) => violations.invalid.push(path),
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Resolves a dotted path such as `swotAnalysis.strengths`.
fn lookup<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = fields.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.as_object()?.get(segment))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn scores() -> Value {
        json!({ "innovation": 8, "feasibility": 7.5, "scalability": 9 })
    }

    #[test]
    fn test_all_present() {
        let fields = object(json!({ "pitchSummary": "p", "scores": scores() }));
        let required = RequiredFields::new(["pitchSummary", "scores"]);
        assert_eq!(check(&fields, &required), Ok(()));
    }

    #[test]
    fn test_every_missing_field_listed() {
        let fields = object(json!({
            "problemStatement": "",
            "existingSolutions": null,
            "scores": scores()
        }));
        let required = RequiredFields::new(["problemStatement", "existingSolutions", "pitchSummary"]);

        let violations = check(&fields, &required).unwrap_err();
        assert_eq!(
            violations.missing,
            vec!["problemStatement", "existingSolutions", "pitchSummary"]
        );
        assert!(violations.invalid.is_empty());
    }

    #[test]
    fn test_missing_score_named() {
        let fields = object(json!({ "scores": { "innovation": 8, "scalability": 9 } }));
        let violations = check(&fields, &RequiredFields::new(["scores"])).unwrap_err();
        assert_eq!(violations.missing, vec!["scores.feasibility"]);
    }

    #[test]
    fn test_string_score_rejected() {
        let fields = object(json!({
            "scores": { "innovation": "8.5", "feasibility": 7, "scalability": 9 }
        }));
        let violations = check(&fields, &RequiredFields::new(["scores"])).unwrap_err();
        assert_eq!(violations.invalid, vec!["scores.innovation"]);
        assert!(violations.missing.is_empty());
    }

    #[test]
    fn test_absent_scores_object() {
        let fields = object(json!({ "pitchSummary": "p" }));
        let violations = check(&fields, &RequiredFields::new(["scores"])).unwrap_err();
        assert_eq!(
            violations.missing,
            vec![
                "scores",
                "scores.innovation",
                "scores.feasibility",
                "scores.scalability"
            ]
        );
    }

    #[test]
    fn test_dotted_required_path() {
        let fields = object(json!({
            "swotAnalysis": { "strengths": [] },
            "scores": scores()
        }));
        let required = RequiredFields::new(["swotAnalysis.strengths", "swotAnalysis.threats"]);

        let violations = check(&fields, &required).unwrap_err();
        assert_eq!(violations.missing, vec!["swotAnalysis.threats"]);
    }

    #[test]
    fn test_zero_and_empty_collections_count_as_present() {
        let fields = object(json!({
            "swotAnalysis": { "strengths": [] },
            "count": 0,
            "scores": { "innovation": 0, "feasibility": 0, "scalability": 0 }
        }));
        let required = RequiredFields::new(["swotAnalysis", "count"]);
        assert_eq!(check(&fields, &required), Ok(()));
    }

    #[test]
    fn test_required_score_path_not_listed_twice() {
        let fields = object(json!({ "scores": { "innovation": 1, "scalability": 2 } }));
        let required = RequiredFields::new(["scores.feasibility"]);
        let violations = check(&fields, &required).unwrap_err();
        assert_eq!(violations.missing, vec!["scores.feasibility"]);
    }
}
