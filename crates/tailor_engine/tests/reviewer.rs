use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use tailor_core::{Impact, Suggestion, SuggestionKind};
use tailor_engine::{
    AnalysisError, ExtractionError, Oracle, OracleError, OracleRequest, Part, ResponseFormat,
    ResumeReviewer, GENERAL_AUDIT_MARKER, TARGETED_MATCH_MARKER,
};

/// Replays canned responses and records every request it sees.
#[derive(Default)]
struct ScriptedOracle {
    responses: Mutex<VecDeque<Result<String, OracleError>>>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    fn replying(responses: Vec<Result<String, OracleError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, request: OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn reviewer(oracle: &Arc<ScriptedOracle>) -> ResumeReviewer {
    ResumeReviewer::new(oracle.clone())
}

fn analysis_json(suggestions: serde_json::Value) -> String {
    json!({
        "atsScore": 72,
        "summary": "Solid but vague.",
        "quality": {
            "clarity": { "score": 7, "feedback": "Readable." },
            "relevance": { "score": 6, "feedback": "Partly relevant." },
            "keywords": { "score": 5, "feedback": "Thin." },
            "formatting": { "score": 8, "feedback": "Clean." }
        },
        "missingKeywords": ["Kubernetes", "  ", "Terraform"],
        "suggestions": suggestions
    })
    .to_string()
}

fn managed_team() -> serde_json::Value {
    json!([{
        "id": "s1",
        "type": "rewrite",
        "originalText": "Managed a team",
        "suggestedText": "Led a team of 8 engineers, cutting release time by 30%",
        "reason": "Adds scope and a metric",
        "impact": "high"
    }])
}

#[tokio::test]
async fn targeted_analysis_uses_match_prompt_and_schema() {
    let oracle = ScriptedOracle::replying(vec![Ok(analysis_json(managed_team()))]);
    let result = reviewer(&oracle)
        .analyze("Managed a team", "Senior engineer, Kubernetes")
        .await
        .expect("analysis ok");

    assert_eq!(result.overall_score, 72);
    assert_eq!(result.missing_keywords, vec!["Kubernetes", "Terraform"]);
    assert_eq!(
        result.suggestions,
        vec![Suggestion {
            id: "s1".into(),
            kind: SuggestionKind::Rewrite,
            original_text: Some("Managed a team".into()),
            suggested_text: "Led a team of 8 engineers, cutting release time by 30%".into(),
            reason: "Adds scope and a metric".into(),
            impact: Impact::High,
        }]
    );

    let requests = oracle.requests();
    assert_eq!(requests.len(), 1);
    let prompt = requests[0].prompt_text();
    assert!(prompt.starts_with(TARGETED_MATCH_MARKER));
    assert!(prompt.contains("Senior engineer, Kubernetes"));
    assert!(prompt.contains("Managed a team"));
    assert!(matches!(requests[0].response, ResponseFormat::Json { .. }));
    assert_eq!(requests[0].temperature, Some(0.2));
}

#[tokio::test]
async fn blank_job_description_runs_general_audit() {
    let oracle = ScriptedOracle::replying(vec![Ok(analysis_json(json!([])))]);
    let result = reviewer(&oracle)
        .analyze("Managed a team", "   \n")
        .await
        .expect("analysis ok");
    assert!(result.suggestions.is_empty());

    let prompt = oracle.requests()[0].prompt_text();
    assert!(prompt.starts_with(GENERAL_AUDIT_MARKER));
    assert!(!prompt.contains("JOB DESCRIPTION:"));
}

#[tokio::test]
async fn fenced_json_is_accepted() {
    let fenced = format!("```json\n{}\n```", analysis_json(managed_team()));
    let oracle = ScriptedOracle::replying(vec![Ok(fenced)]);
    let result = reviewer(&oracle).analyze("Managed a team", "").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn non_json_payload_is_malformed() {
    let oracle = ScriptedOracle::replying(vec![Ok("I cannot help with that.".into())]);
    let err = reviewer(&oracle).analyze("text", "").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Malformed(_)));
}

#[tokio::test]
async fn empty_payload_fails_schema_validation() {
    let oracle = ScriptedOracle::replying(vec![Ok(String::new())]);
    let err = reviewer(&oracle).analyze("text", "").await.unwrap_err();
    match err {
        AnalysisError::Schema(schema) => assert_eq!(schema.path, "$.atsScore"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_suggestion_type_is_rejected() {
    let bad = json!([{
        "id": "s1",
        "type": "delete",
        "suggestedText": "x",
        "reason": "y",
        "impact": "low"
    }]);
    let oracle = ScriptedOracle::replying(vec![Ok(analysis_json(bad))]);
    let err = reviewer(&oracle).analyze("text", "").await.unwrap_err();
    match err {
        AnalysisError::Schema(schema) => assert_eq!(schema.path, "$.suggestions[0].type"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_suggestion_ids_are_rejected() {
    let dup = json!([
        { "id": "s1", "type": "addition", "suggestedText": "a", "reason": "r", "impact": "low" },
        { "id": "s1", "type": "format", "suggestedText": "b", "reason": "r", "impact": "medium" }
    ]);
    let oracle = ScriptedOracle::replying(vec![Ok(analysis_json(dup))]);
    let err = reviewer(&oracle).analyze("text", "").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Schema(ref schema) if schema.path == "$.suggestions[1].id"));
}

#[tokio::test]
async fn oracle_failure_surfaces_unchanged() {
    let oracle = ScriptedOracle::replying(vec![Err(OracleError::Timeout)]);
    let err = reviewer(&oracle).analyze("text", "jd").await.unwrap_err();
    assert_eq!(err, AnalysisError::Oracle(OracleError::Timeout));
}

#[tokio::test]
async fn extraction_sends_document_inline() {
    let oracle = ScriptedOracle::replying(vec![Ok("# Jane Doe\n- Managed a team".into())]);
    let text = reviewer(&oracle)
        .extract_text(b"%PDF-1.7 fake", "application/pdf")
        .await
        .expect("extraction ok");
    assert_eq!(text, "# Jane Doe\n- Managed a team");

    let request = &oracle.requests()[0];
    assert_eq!(
        request.parts[0],
        Part::InlineData {
            mime_type: "application/pdf".into(),
            bytes: b"%PDF-1.7 fake".to_vec(),
        }
    );
    assert!(request.prompt_text().contains("verbatim"));
    assert_eq!(request.response, ResponseFormat::Text);
}

#[tokio::test]
async fn plain_text_upload_is_normalized_to_utf8() {
    // "Café" in windows-1252
    let legacy = b"Caf\xe9 manager".to_vec();
    let oracle = ScriptedOracle::replying(vec![Ok("Café manager".into())]);
    reviewer(&oracle)
        .extract_text(&legacy, "text/plain")
        .await
        .expect("extraction ok");

    match &oracle.requests()[0].parts[0] {
        Part::InlineData { bytes, .. } => {
            assert_eq!(std::str::from_utf8(bytes).unwrap(), "Café manager")
        }
        other => panic!("expected inline data, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_extraction_is_an_error() {
    let oracle = ScriptedOracle::replying(vec![Ok("  \n ".into())]);
    let err = reviewer(&oracle)
        .extract_text(b"data", "application/pdf")
        .await
        .unwrap_err();
    assert_eq!(err, ExtractionError::Empty);
}

#[tokio::test]
async fn optimization_prompt_lists_directives() {
    let long_original = "Managed a team ".repeat(20);
    let suggestions = vec![Suggestion {
        id: "s1".into(),
        kind: SuggestionKind::Rewrite,
        original_text: Some(long_original.clone()),
        suggested_text: "Led 8 engineers".into(),
        reason: "Adds scope".into(),
        impact: Impact::High,
    }];
    let oracle = ScriptedOracle::replying(vec![Ok("# Jane\n- Led 8 engineers".into())]);
    let optimized = reviewer(&oracle)
        .auto_optimize(&long_original, "", &suggestions)
        .await
        .expect("optimize ok");
    assert_eq!(optimized.text, "# Jane\n- Led 8 engineers");
    assert!(optimized.unresolved_placeholders.is_empty());

    let prompt = oracle.requests()[0].prompt_text();
    let excerpt: String = long_original.chars().take(100).collect();
    assert!(prompt.contains(&format!("REPLACE: \"{excerpt}...\" WITH: \"Led 8 engineers\"")));
    assert!(prompt.contains("TARGET JD CONTEXT (for context only):\nN/A"));
}

#[tokio::test]
async fn blank_optimization_keeps_current_text() {
    let oracle = ScriptedOracle::replying(vec![Ok(String::new())]);
    let optimized = reviewer(&oracle)
        .auto_optimize("Improved efficiency by X%", "jd", &[])
        .await
        .expect("optimize ok");
    assert_eq!(optimized.text, "Improved efficiency by X%");
    assert_eq!(optimized.unresolved_placeholders, vec!["X%".to_string()]);
}
