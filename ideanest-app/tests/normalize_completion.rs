//! Contract tests for `normalize` against realistic model completions.

use ideanest_app::normalizer::{
    normalize, normalize_traced, NormalizationFailure, Recovery, RequiredFields, Stage,
};
use serde_json::{json, Value};

fn report() -> Value {
    json!({
        "problemStatement": "Small farms lose produce to spoilage.",
        "existingSolutions": "Cold chains that are too expensive.",
        "proposedSolution": "Solar-powered shared cold rooms.",
        "marketPotential": "Large and growing.",
        "swotAnalysis": {
            "strengths": ["cheap"],
            "weaknesses": ["capex"],
            "opportunities": ["subsidies"],
            "threats": ["weather"]
        },
        "businessModel": "Pay per crate stored.",
        "prosConsImprovements": {
            "pros": ["simple"],
            "cons": ["logistics"],
            "improvements": ["partner with co-ops"]
        },
        "pitchSummary": "Cold storage as a service for smallholders.",
        "scores": { "innovation": 7.5, "feasibility": 8, "scalability": 6.5 },
        "competitors": [{ "name": "ColdHubs", "description": "Nigeria" }]
    })
}

fn required() -> RequiredFields {
    RequiredFields::evaluation()
}

#[test]
fn valid_json_is_returned_unchanged() {
    let raw = report().to_string();
    let record = normalize(&raw, &required()).unwrap();
    assert_eq!(record.into_value(), report());
}

#[test]
fn fenced_and_bare_inputs_agree() {
    let body = serde_json::to_string_pretty(&report()).unwrap();
    let bare = normalize(&body, &required()).unwrap();

    for fenced in [
        format!("```json\n{body}\n```"),
        format!("```\n{body}\n```"),
        format!("\n\n```JSON\n{body}\n```\n"),
    ] {
        assert_eq!(normalize(&fenced, &required()).unwrap(), bare);
    }
}

#[test]
fn surrounding_prose_is_ignored() {
    let body = report().to_string();
    let raw = format!("Here is my brutally honest evaluation:\n{body}\nGood luck with it.");
    let record = normalize(&raw, &required()).unwrap();
    assert_eq!(record.into_value(), report());
}

#[test]
fn fenced_concrete_scenario() {
    let raw = "```json\n{\"problemStatement\":\"x\",\"existingSolutions\":\"y\",\"proposedSolution\":\"z\",\"marketPotential\":\"w\",\"businessModel\":\"b\",\"pitchSummary\":\"p\",\"swotAnalysis\":{\"strengths\":[],\"weaknesses\":[],\"opportunities\":[],\"threats\":[]},\"prosConsImprovements\":{\"pros\":[],\"cons\":[],\"improvements\":[]},\"scores\":{\"innovation\":8,\"feasibility\":7,\"scalability\":9}}\n```";

    let normalized = normalize_traced(raw, &required()).unwrap();
    assert_eq!(normalized.recovery, Recovery::Direct);
    assert_eq!(normalized.record.as_map()["scores"]["innovation"], 8);
    assert_eq!(normalized.record.scores().innovation, 8.0);
}

#[test]
fn text_without_json_is_an_extraction_failure() {
    let err = normalize("no json here at all", &required()).unwrap_err();
    assert_eq!(err.stage(), Stage::Extraction);
    assert!(matches!(err, NormalizationFailure::Extraction { .. }));
    assert!(!err.diagnostics().is_empty());
}

#[test]
fn invalid_escapes_are_sanitized() {
    let body = report().to_string().replace(
        "Pay per crate stored.",
        r"Pay per crate stored, 20\% margin, it\'s simple.",
    );

    let normalized = normalize_traced(&body, &required()).unwrap();
    assert_eq!(normalized.recovery, Recovery::Sanitized);
    assert_eq!(
        normalized.record.business_model(),
        r"Pay per crate stored, 20\% margin, it's simple."
    );
}

#[test]
fn truncated_completion_keeps_only_complete_prefix() {
    let raw = r#"{"problemStatement": "x", "scores": {"innovation": 7, "feasibility": 8, "scalability": 6}, "pitchSummary": "p", "prosConsImprovements": {"pros": ["simple"], "cons": ["logistics", "cost"#;

    let err = normalize(raw, &required()).unwrap_err();
    // Everything after the last closing brace is discarded, the object is
    // closed, and validation reports what the cut removed.
    assert_eq!(err.stage(), Stage::Validation);
    assert!(err.missing_fields().contains(&"pitchSummary".to_string()));
    assert!(err.missing_fields().contains(&"prosConsImprovements".to_string()));
    assert!(!err.missing_fields().iter().any(|f| f.starts_with("scores")));
}

#[test]
fn truncated_swot_list_is_dropped_not_guessed() {
    let raw = r#"{"scores": {"innovation": 8, "feasibility": 7, "scalability": 9}, "swotAnalysis": {"strengths": ["a", "b""#;

    let normalized = normalize_traced(raw, &RequiredFields::new(["scores"])).unwrap();
    assert_eq!(normalized.recovery, Recovery::Repaired);
    assert!(!normalized.record.as_map().contains_key("swotAnalysis"));
    assert_eq!(normalized.record.scores().scalability, 9.0);
}

#[test]
fn truncated_report_with_scores_recovers() {
    let mut value = report();
    value.as_object_mut().unwrap().remove("competitors");
    let body = value.to_string();
    // Drop the final closing brace and append a half-written optional section.
    let truncated = format!(
        "{}, \"refinedVersions\": [{{\"title\": \"Co-op model\", \"descr",
        &body[..body.len() - 1]
    );

    let normalized = normalize_traced(&truncated, &required()).unwrap();
    assert_eq!(normalized.recovery, Recovery::Repaired);
    assert_eq!(normalized.record.scores().feasibility, 8.0);
    assert!(normalized.record.refined_versions().is_empty());
    assert_eq!(normalized.record.pitch_summary(), "Cold storage as a service for smallholders.");
}

#[test]
fn missing_feasibility_is_named() {
    let mut value = report();
    value["scores"].as_object_mut().unwrap().remove("feasibility");

    let err = normalize(&value.to_string(), &required()).unwrap_err();
    assert_eq!(err.stage(), Stage::Validation);
    assert_eq!(err.missing_fields(), ["scores.feasibility".to_string()]);
    assert!(err.to_string().contains("scores.feasibility"));
}

#[test]
fn string_score_fails_validation() {
    let mut value = report();
    value["scores"]["innovation"] = json!("8.5");

    let err = normalize(&value.to_string(), &required()).unwrap_err();
    assert_eq!(err.stage(), Stage::Validation);
    assert_eq!(err.invalid_fields(), ["scores.innovation".to_string()]);
}

#[test]
fn every_missing_field_is_reported() {
    let raw = r#"{"problemStatement": "x", "scores": {"innovation": 1, "feasibility": 2, "scalability": 3}}"#;
    let err = normalize(raw, &required()).unwrap_err();

    assert_eq!(
        err.missing_fields(),
        [
            "existingSolutions",
            "proposedSolution",
            "marketPotential",
            "swotAnalysis",
            "businessModel",
            "prosConsImprovements",
            "pitchSummary",
        ]
        .map(String::from)
    );
}

#[test]
fn truncated_object_repairs_then_fails_validation() {
    let raw = "model output follows {\"a\": [1, 2";
    // No closing brace, so the boundary step has nothing to work with.
    let err = normalize(raw, &required()).unwrap_err();
    assert_eq!(err.stage(), Stage::Extraction);

    let raw = "```json\n{\"a\": [1, 2, {\"b\": 3}], \"c\": [4, 5";
    let err = normalize_traced(raw, &RequiredFields::new(["a"])).unwrap_err();
    assert_eq!(err.stage(), Stage::Validation);
    assert!(err.missing_fields().contains(&"scores.innovation".to_string()));
}

#[test]
fn unrecoverable_text_is_a_parse_failure() {
    let err = normalize("{ this is : not json }", &required()).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    match err {
        NormalizationFailure::Parse { message, diagnostics } => {
            assert!(!message.is_empty());
            assert!(diagnostics.len() >= 3);
        }
        other => panic!("unexpected failure: {other:?}"),
    }
}
