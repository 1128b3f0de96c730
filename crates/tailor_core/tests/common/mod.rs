#![allow(dead_code)]

use std::sync::Once;

use tailor_core::{
    update, AnalysisMode, AnalysisResult, AppState, Effect, Impact, Msg, QualityMetric,
    QualityReport, RequestId, ResumeFile, Suggestion, SuggestionKind,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tailor_logging::initialize_for_tests);
}

pub fn metric(score: f64) -> QualityMetric {
    QualityMetric {
        score,
        feedback: format!("feedback for {score}"),
    }
}

pub fn sample_result(overall_score: i64) -> AnalysisResult {
    AnalysisResult {
        overall_score,
        summary: "Vague bullets, no metrics.".to_string(),
        quality: QualityReport {
            clarity: metric(6.0),
            relevance: metric(7.0),
            keywords: metric(40.0),
            formatting: metric(8.0),
        },
        missing_keywords: vec!["Kubernetes".to_string()],
        suggestions: vec![Suggestion {
            id: "s1".to_string(),
            kind: SuggestionKind::Rewrite,
            original_text: Some("Managed a team".to_string()),
            suggested_text: "Led a team of 8 engineers, cutting release time by X%".to_string(),
            reason: "Adds scope and a metric.".to_string(),
            impact: Impact::High,
        }],
    }
}

pub fn txt_upload(content: &str) -> ResumeFile {
    ResumeFile::from_named_bytes("resume.txt", content.as_bytes().to_vec()).expect("valid upload")
}

/// Extracts the request id from the single oracle effect in `effects`.
pub fn request_of(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ExtractText { request, .. }
            | Effect::Analyze { request, .. }
            | Effect::AutoOptimize { request, .. } => Some(*request),
            _ => None,
        })
        .expect("oracle effect")
}

/// Signed-in state that has uploaded and extracted `text`, sitting in Ready.
pub fn ready_with(text: &str) -> AppState {
    let (state, effects) = update(AppState::signed_in(), Msg::UploadSubmitted(txt_upload(text)));
    let request = request_of(&effects);
    let (state, _) = update(
        state,
        Msg::TextExtracted {
            request,
            result: Ok(text.to_string()),
        },
    );
    state
}

/// State in Results after one successful analysis in `mode`.
pub fn results_with(mode: AnalysisMode, job_description: &str, score: i64) -> AppState {
    let state = ready_with("Managed a team");
    let (state, _) = update(state, Msg::JobDescriptionChanged(job_description.to_string()));
    let (state, effects) = update(state, Msg::AnalyzeClicked(mode));
    let request = request_of(&effects);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request,
            result: Ok(sample_result(score)),
        },
    );
    state
}
